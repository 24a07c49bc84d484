// ==========================================
// 进销存后台管理系统 - 交换模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 交换模块错误类型
///
/// 行级的解析/匹配问题不是错误：它们以 ImportDiagnostic 的形式
/// 随返回值流出，部分成功是默认行为。这里只定义会中断单次
/// 导出/导入操作的异常。
#[derive(Error, Debug)]
pub enum ExchangeError {
    // ===== 保存相关 =====
    /// 用户在交互式另存对话框中取消。不是失败：调用方应静默返回，
    /// 不得弹出错误提示，也不得改走自动下载。
    #[error("用户取消了保存")]
    UserCancelled,

    #[error("文件写入失败: {0}")]
    Io(String),

    // ===== 引擎相关 =====
    #[error("表格引擎初始化失败: {0}")]
    LoaderFailure(String),

    #[error("工作簿生成失败: {0}")]
    WorkbookBuild(String),

    // ===== 解析相关 =====
    #[error("Excel 解析失败: {0}")]
    ExcelParse(String),

    #[error("CSV 解析失败: {0}")]
    CsvParse(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    // ===== 协作方错误 =====
    #[error("目录服务查询失败: {0}")]
    CatalogQuery(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ExchangeError {
    fn from(err: std::io::Error) -> Self {
        ExchangeError::Io(err.to_string())
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ExchangeError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExchangeError::WorkbookBuild(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ExchangeError {
    fn from(err: calamine::XlsxError) -> Self {
        ExchangeError::ExcelParse(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ExchangeError {
    fn from(err: csv::Error) -> Self {
        ExchangeError::CsvParse(err.to_string())
    }
}

/// 交互式另存路径的错误类型
///
/// 取消与能力性失败必须可区分：取消是用户的明确选择，向上传播后
/// 整个保存流程终止；能力性失败才允许回退到自动下载。
#[derive(Error, Debug)]
pub enum InteractiveSaveError {
    #[error("用户取消了保存")]
    Cancelled,

    #[error("宿主不支持交互式另存: {0}")]
    Unavailable(String),

    #[error("交互式保存失败: {0}")]
    Failed(String),
}

/// Result 类型别名
pub type ExchangeResult<T> = Result<T, ExchangeError>;
