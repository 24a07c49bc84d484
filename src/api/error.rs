// ==========================================
// 进销存后台管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换交换层错误为用户友好的错误消息
// ==========================================

use crate::exchange::ExchangeError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 交互结果
    // ==========================================
    /// 用户取消了操作。不是失败：调用方应静默结束，不弹错误提示
    #[error("用户取消了操作")]
    Cancelled,

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 导出/导入错误
    // ==========================================
    #[error("文件导出失败: {0}")]
    ExportError(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ExchangeError 转换
// 目的: 将交换层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::UserCancelled => ApiError::Cancelled,

            // 保存/生成错误
            ExchangeError::Io(msg) => ApiError::ExportError(format!("文件写入失败: {}", msg)),
            ExchangeError::WorkbookBuild(msg) => ApiError::ExportError(msg),

            // 引擎错误（可重试）
            ExchangeError::LoaderFailure(msg) => {
                ApiError::InternalError(format!("表格引擎初始化失败: {}", msg))
            }

            // 解析错误
            ExchangeError::ExcelParse(msg) | ExchangeError::CsvParse(msg) => {
                ApiError::ImportError(msg)
            }
            ExchangeError::UnsupportedFormat(msg) => {
                ApiError::InvalidInput(format!("文件格式不支持: {}", msg))
            }

            // 协作方错误
            ExchangeError::CatalogQuery(msg) => {
                ApiError::ImportError(format!("目录服务查询失败: {}", msg))
            }

            ExchangeError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
