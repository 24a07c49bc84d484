// ==========================================
// 进销存后台管理系统 - 交换配置读取 Trait
// ==========================================
// 职责: 定义交换模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;

// ==========================================
// ExchangeConfigReader Trait
// ==========================================
// 用途: 交换模块所需的配置读取接口
// 实现者: ConfigManager
#[async_trait]
pub trait ExchangeConfigReader: Send + Sync {
    /// 获取导出工作表名
    ///
    /// # 默认值
    /// - "商品档案"
    async fn get_export_sheet_name(&self) -> anyhow::Result<String>;

    /// 获取导出文件名前缀（后接时间戳）
    ///
    /// # 默认值
    /// - "商品档案"
    async fn get_export_file_prefix(&self) -> anyhow::Result<String>;

    /// 获取导入数量列缺失/非法时的默认数量
    ///
    /// # 默认值
    /// - 1.0
    async fn get_default_import_quantity(&self) -> anyhow::Result<f64>;

    /// 获取单次导入的行数上限
    ///
    /// # 默认值
    /// - 5000
    ///
    /// # 用途
    /// - 导入面向操作员规模的批次；超限直接拒绝，避免逐行
    ///   目录查询拖垮会话
    async fn get_max_import_rows(&self) -> anyhow::Result<usize>;
}
