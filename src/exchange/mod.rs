// ==========================================
// 进销存后台管理系统 - 表格数据交换层
// ==========================================
// 职责: 业务记录 ↔ 表格文件的双向转换
// 导出: 列模板 + 记录 → 带样式工作簿 → 保存策略落盘
// 导入: 文件缓冲 → 解析 → 归一化 → 目录匹配 → 对账合并 + 行级诊断
// ==========================================

// 模块声明
pub mod engine_loader;
pub mod error;
pub mod exchange_trait;
pub mod generator;
pub mod normalizer;
pub mod parser;
pub mod persistence;
pub mod reconciler;
pub mod resolver;
pub mod schema;

// 重导出核心类型
pub use engine_loader::{FormatEngineInit, FormatEngineLoader, XlsxFormatEngine};
pub use error::{ExchangeError, ExchangeResult, InteractiveSaveError};
pub use generator::{generate_item_workbook, CellValue};
pub use normalizer::{normalize, normalize_rows, ImportRow};
pub use parser::{parse_csv_rows, parse_rows, parse_workbook_rows, RawCell, RawRow};
pub use persistence::{save_workbook, DownloadDirSurface, SaveMode, SaveReport};
pub use reconciler::{reconcile, ImportDiagnostic, ReconcileSummary};
pub use resolver::{resolve, MatchOutcome};
pub use schema::{item_export_columns, line_import_columns, ColumnSpec};

// 重导出 Trait 接口
pub use exchange_trait::{CatalogGateway, SaveSurface};
