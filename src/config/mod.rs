// ==========================================
// 进销存后台管理系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持覆写
// ==========================================

pub mod config_manager;
pub mod exchange_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use exchange_config_trait::ExchangeConfigReader;
