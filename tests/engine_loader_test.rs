// ==========================================
// 进销存后台管理系统 - 表格引擎加载器集成测试
// ==========================================
// 覆盖: 并发首次调用共享同一次初始化；失败可重试；成功为终态
// ==========================================

use async_trait::async_trait;
use jxc_backoffice::exchange::{ExchangeError, FormatEngineInit, FormatEngineLoader};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// 慢速初始化器：拉长初始化窗口，让并发调用真正重叠
struct SlowInit {
    calls: AtomicUsize,
    fail_first: AtomicUsize,
}

impl SlowInit {
    fn new(fail_first: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(fail_first),
        }
    }
}

#[async_trait]
impl FormatEngineInit for SlowInit {
    async fn initialize(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            anyhow::bail!("初始化失败（注入）");
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_concurrent_callers_share_one_initialization() {
    jxc_backoffice::logging::init_test();
    let init = Arc::new(SlowInit::new(0));
    let loader = Arc::new(FormatEngineLoader::new(init.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let loader = loader.clone();
        handles.push(tokio::spawn(async move { loader.ensure_loaded().await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // 八个并发调用只发起一次初始化
    assert_eq!(init.calls.load(Ordering::SeqCst), 1);
    assert!(loader.is_loaded());
}

#[tokio::test]
async fn test_all_waiters_see_failure_then_retry_succeeds() {
    let init = Arc::new(SlowInit::new(1));
    let loader = Arc::new(FormatEngineLoader::new(init.clone()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let loader = loader.clone();
        handles.push(tokio::spawn(async move { loader.ensure_loaded().await }));
    }

    // 首轮：所有等待者共享同一次失败
    let mut failures = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Err(ExchangeError::LoaderFailure(_)) => failures += 1,
            other => panic!("期望 LoaderFailure，实际 {:?}", other.map(|_| ())),
        }
    }
    assert_eq!(failures, 4);
    assert_eq!(init.calls.load(Ordering::SeqCst), 1);
    assert!(!loader.is_loaded());

    // 重试：状态已回到未加载，重新发起并成功
    loader.ensure_loaded().await.unwrap();
    assert_eq!(init.calls.load(Ordering::SeqCst), 2);
    assert!(loader.is_loaded());
}

#[tokio::test]
async fn test_loaded_state_is_terminal() {
    let init = Arc::new(SlowInit::new(0));
    let loader = FormatEngineLoader::new(init.clone());

    loader.ensure_loaded().await.unwrap();
    for _ in 0..3 {
        loader.ensure_loaded().await.unwrap();
    }
    assert_eq!(init.calls.load(Ordering::SeqCst), 1);
}
