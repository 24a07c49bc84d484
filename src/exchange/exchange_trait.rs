// ==========================================
// 进销存后台管理系统 - 交换模块协作方接口
// ==========================================
// 职责: 定义交换引擎依赖的外部协作方接口（不包含实现）
// 红线: 引擎只依赖本文件的 trait，不感知目录服务/宿主的具体实现
// ==========================================

use crate::domain::CatalogItem;
use crate::exchange::error::InteractiveSaveError;
use async_trait::async_trait;
use std::path::PathBuf;

// ==========================================
// CatalogGateway Trait
// ==========================================
// 用途: 商品目录查询接口（导入匹配阶段逐行调用）
// 实现者: 远端目录服务客户端；测试中为内存假目录
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// 按商品编码查询候选商品
    ///
    /// # 参数
    /// - code: 商品编码（匹配主编码或任一别名，大小写不敏感）
    ///
    /// # 返回
    /// - Ok(Vec<CatalogItem>): 候选商品列表（可为空）
    /// - Err: 传输/服务错误（中断整个导入操作）
    ///
    /// # 说明
    /// - 引擎不依赖服务端的排序与过滤，匹配判定在引擎侧完成
    async fn search(&self, code: &str) -> anyhow::Result<Vec<CatalogItem>>;
}

// ==========================================
// SaveSurface Trait
// ==========================================
// 用途: 宿主文件保存能力接口
// 实现者: 桌面宿主（另存对话框 + 下载目录）；测试中为记录式假宿主
#[async_trait]
pub trait SaveSurface: Send + Sync {
    /// 宿主当前是否具备交互式另存能力
    ///
    /// # 说明
    /// - false 时保存策略直接走自动下载路径
    /// - 能力可能随宿主环境变化（无窗口/受限上下文等）
    fn interactive_available(&self) -> bool;

    /// 弹出另存对话框并写入用户选择的位置
    ///
    /// # 返回
    /// - Ok(PathBuf): 实际写入路径
    /// - Err(InteractiveSaveError::Cancelled): 用户取消（不得回退下载）
    /// - Err(其他): 能力性失败（保存策略回退下载）
    async fn save_interactive(
        &self,
        buffer: &[u8],
        suggested_name: &str,
    ) -> Result<PathBuf, InteractiveSaveError>;

    /// 直接写入默认下载目录
    ///
    /// # 返回
    /// - Ok(PathBuf): 实际写入路径
    /// - Err: IO 错误（保存策略向上传播）
    async fn save_to_downloads(
        &self,
        buffer: &[u8],
        suggested_name: &str,
    ) -> Result<PathBuf, std::io::Error>;
}
