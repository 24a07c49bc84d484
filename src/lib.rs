// ==========================================
// 进销存后台管理系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio
// 系统定位: 后台管理系统的表格数据交换引擎
// （商品档案批量导出 / 单据行批量导入）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 交换层 - 表格文件生成/解析/对账
pub mod exchange;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{CatalogItem, DocumentLine};

// 交换引擎
pub use exchange::{
    CatalogGateway, ColumnSpec, ExchangeError, ExchangeResult, FormatEngineLoader,
    ImportDiagnostic, ImportRow, MatchOutcome, RawCell, RawRow, SaveMode, SaveReport,
    SaveSurface,
};

// API
pub use api::{ApiError, ApiResult, ExchangeApi, ExportApiResponse, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "进销存后台管理系统";
