// ==========================================
// 进销存后台管理系统 - 表格引擎加载器
// ==========================================
// 职责: 表格编解码引擎的惰性一次性初始化
// 红线: 并发首次调用共享同一个在途初始化；失败后状态回到未加载，
//       下次调用可重试（失败不是终态）
// ==========================================

use crate::exchange::error::{ExchangeError, ExchangeResult};
use anyhow::Context;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

// ==========================================
// FormatEngineInit Trait
// ==========================================
// 用途: 引擎实际初始化动作（注入点，便于测试替换）
// 实现者: XlsxFormatEngine；测试中为计数/失败注入实现
#[async_trait]
pub trait FormatEngineInit: Send + Sync {
    /// 执行一次引擎初始化
    ///
    /// # 返回
    /// - Ok(()): 引擎就绪
    /// - Err: 初始化失败（加载器回到未加载状态）
    async fn initialize(&self) -> anyhow::Result<()>;
}

type SharedInit = Shared<BoxFuture<'static, Result<(), Arc<anyhow::Error>>>>;

/// 加载阶段
///
/// 布尔标记无法表达"正在加载"：并发调用需要挂到同一个在途
/// 初始化上，所以 Loading 持有可克隆的共享 future。
enum LoadPhase {
    Unloaded,
    Loading(SharedInit),
    Loaded,
}

struct LoaderState {
    // 代号用于区分"本次等待的初始化"与"后来者重新发起的初始化"，
    // 避免迟到的等待者把新一轮状态误写回去
    generation: u64,
    phase: LoadPhase,
}

// ==========================================
// FormatEngineLoader - 表格引擎加载器
// ==========================================
// 进程级单例（由应用状态持有），除就绪标志外引擎无跨调用状态
pub struct FormatEngineLoader {
    init: Arc<dyn FormatEngineInit>,
    state: Mutex<LoaderState>,
}

impl FormatEngineLoader {
    /// 创建加载器
    ///
    /// # 参数
    /// - init: 引擎初始化动作
    pub fn new(init: Arc<dyn FormatEngineInit>) -> Self {
        Self {
            init,
            state: Mutex::new(LoaderState {
                generation: 0,
                phase: LoadPhase::Unloaded,
            }),
        }
    }

    /// 确保引擎已加载
    ///
    /// # 行为
    /// - 已加载: 立即返回 Ok
    /// - 加载中: 挂到同一个在途初始化上等待（不重复发起）
    /// - 未加载: 发起初始化；成功进入已加载（终态），
    ///   失败回到未加载并向所有等待者返回错误
    pub async fn ensure_loaded(&self) -> ExchangeResult<()> {
        let (fut, generation) = {
            let mut state = self.lock_state();
            match &state.phase {
                LoadPhase::Loaded => return Ok(()),
                LoadPhase::Loading(fut) => {
                    debug!("表格引擎正在加载，共享在途初始化");
                    (fut.clone(), state.generation)
                }
                LoadPhase::Unloaded => {
                    let init = Arc::clone(&self.init);
                    let fut: SharedInit = async move {
                        init.initialize().await.map_err(Arc::new)
                    }
                    .boxed()
                    .shared();
                    state.generation += 1;
                    state.phase = LoadPhase::Loading(fut.clone());
                    debug!(generation = state.generation, "发起表格引擎初始化");
                    (fut, state.generation)
                }
            }
        };

        let result = fut.await;

        {
            let mut state = self.lock_state();
            // 仅当仍是本轮初始化时回写状态
            if state.generation == generation {
                state.phase = match &result {
                    Ok(()) => LoadPhase::Loaded,
                    Err(_) => LoadPhase::Unloaded,
                };
            }
        }

        result.map_err(|e| {
            warn!(error = %e, "表格引擎初始化失败");
            ExchangeError::LoaderFailure(e.to_string())
        })
    }

    /// 引擎是否已就绪（不触发加载）
    pub fn is_loaded(&self) -> bool {
        matches!(self.lock_state().phase, LoadPhase::Loaded)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ==========================================
// XlsxFormatEngine - 生产初始化实现
// ==========================================
// 首次使用前对编解码器做一次预热：在阻塞线程上生成最小工作簿，
// 验证生成路径可用（字体/样式等惰性资源随之就位）
pub struct XlsxFormatEngine;

#[async_trait]
impl FormatEngineInit for XlsxFormatEngine {
    async fn initialize(&self) -> anyhow::Result<()> {
        tokio::task::spawn_blocking(|| -> anyhow::Result<()> {
            let mut workbook = rust_xlsxwriter::Workbook::new();
            let sheet = workbook.add_worksheet();
            sheet.write_string(0, 0, "ok")?;
            workbook.save_to_buffer()?;
            Ok(())
        })
        .await
        .context("表格引擎预热任务失败")??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // 计数初始化器：记录 initialize 实际执行次数，可注入失败
    struct CountingInit {
        calls: AtomicUsize,
        fail_first: AtomicUsize, // 前 N 次调用失败
    }

    impl CountingInit {
        fn new(fail_first: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first: AtomicUsize::new(fail_first),
            }
        }
    }

    #[async_trait]
    impl FormatEngineInit for CountingInit {
        async fn initialize(&self) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let remaining = self.fail_first.load(Ordering::SeqCst);
            if remaining > 0 {
                self.fail_first.store(remaining - 1, Ordering::SeqCst);
                anyhow::bail!("注入的初始化失败");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_second_call_is_noop() {
        let init = Arc::new(CountingInit::new(0));
        let loader = FormatEngineLoader::new(init.clone());

        loader.ensure_loaded().await.unwrap();
        loader.ensure_loaded().await.unwrap();

        assert_eq!(init.calls.load(Ordering::SeqCst), 1);
        assert!(loader.is_loaded());
    }

    #[tokio::test]
    async fn test_failure_is_retryable() {
        let init = Arc::new(CountingInit::new(1));
        let loader = FormatEngineLoader::new(init.clone());

        let first = loader.ensure_loaded().await;
        assert!(matches!(first, Err(ExchangeError::LoaderFailure(_))));
        assert!(!loader.is_loaded());

        // 失败后状态回到未加载，重试应重新发起并成功
        loader.ensure_loaded().await.unwrap();
        assert_eq!(init.calls.load(Ordering::SeqCst), 2);
        assert!(loader.is_loaded());
    }

    #[tokio::test]
    async fn test_xlsx_engine_initializes() {
        let loader = FormatEngineLoader::new(Arc::new(XlsxFormatEngine));
        loader.ensure_loaded().await.unwrap();
        assert!(loader.is_loaded());
    }
}
