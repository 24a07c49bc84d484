// ==========================================
// 进销存后台管理系统 - 配置管理器
// ==========================================
// 职责: 配置默认值与覆写管理
// 存储: 进程内 key-value 覆写表（远端配置由上层同步写入）
// ==========================================

use crate::config::exchange_config_trait::ExchangeConfigReader;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// 配置键常量
pub mod config_keys {
    /// 导出工作表名
    pub const EXPORT_SHEET_NAME: &str = "exchange.export_sheet_name";
    /// 导出文件名前缀
    pub const EXPORT_FILE_PREFIX: &str = "exchange.export_file_prefix";
    /// 导入默认数量
    pub const DEFAULT_IMPORT_QUANTITY: &str = "exchange.default_import_quantity";
    /// 导入行数上限
    pub const MAX_IMPORT_ROWS: &str = "exchange.max_import_rows";
}

// 内置默认值
const DEFAULT_EXPORT_SHEET_NAME: &str = "商品档案";
const DEFAULT_EXPORT_FILE_PREFIX: &str = "商品档案";
// 与归一化层的兜底默认值保持同一来源
const DEFAULT_IMPORT_QUANTITY: f64 = crate::exchange::schema::DEFAULT_QUANTITY;
const DEFAULT_MAX_IMPORT_ROWS: usize = 5000;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    overrides: Mutex<HashMap<String, String>>,
}

impl ConfigManager {
    /// 创建仅含默认值的配置管理器
    pub fn new() -> Self {
        Self {
            overrides: Mutex::new(HashMap::new()),
        }
    }

    /// 写入单个覆写值
    pub fn set_override(&self, key: &str, value: &str) {
        self.lock_overrides()
            .insert(key.to_string(), value.to_string());
    }

    /// 读取覆写值
    ///
    /// # 返回
    /// - Some(String): 存在覆写
    /// - None: 使用默认值
    pub fn get_override(&self, key: &str) -> Option<String> {
        self.lock_overrides().get(key).cloned()
    }

    fn lock_overrides(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.overrides.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // 解析失败的覆写值按不存在处理，回落默认值
    fn parsed_override<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get_override(key).and_then(|v| v.trim().parse().ok())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeConfigReader for ConfigManager {
    async fn get_export_sheet_name(&self) -> anyhow::Result<String> {
        Ok(self
            .get_override(config_keys::EXPORT_SHEET_NAME)
            .unwrap_or_else(|| DEFAULT_EXPORT_SHEET_NAME.to_string()))
    }

    async fn get_export_file_prefix(&self) -> anyhow::Result<String> {
        Ok(self
            .get_override(config_keys::EXPORT_FILE_PREFIX)
            .unwrap_or_else(|| DEFAULT_EXPORT_FILE_PREFIX.to_string()))
    }

    async fn get_default_import_quantity(&self) -> anyhow::Result<f64> {
        Ok(self
            .parsed_override::<f64>(config_keys::DEFAULT_IMPORT_QUANTITY)
            .filter(|q| q.is_finite() && *q >= 0.0)
            .unwrap_or(DEFAULT_IMPORT_QUANTITY))
    }

    async fn get_max_import_rows(&self) -> anyhow::Result<usize> {
        Ok(self
            .parsed_override::<usize>(config_keys::MAX_IMPORT_ROWS)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_IMPORT_ROWS))
    }
}
