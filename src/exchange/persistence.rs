// ==========================================
// 进销存后台管理系统 - 保存策略
// ==========================================
// 职责: 工作簿缓冲落盘（交互式另存优先，自动下载兜底）
// 红线: 用户取消是用户的明确选择，直接向上传播，绝不转成
//       一次用户没有要求的"成功下载"；只有能力性失败才回退
// ==========================================

use crate::exchange::error::{ExchangeError, ExchangeResult, InteractiveSaveError};
use crate::exchange::exchange_trait::SaveSurface;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// 实际使用的保存路径类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveMode {
    /// 交互式另存对话框
    Interactive,
    /// 默认下载目录自动写入
    DownloadDir,
}

/// 保存结果（日志与测试用的补充信息）
#[derive(Debug, Clone)]
pub struct SaveReport {
    pub mode: SaveMode,
    pub path: PathBuf,
}

/// 保存工作簿缓冲
///
/// # 决策顺序
/// 1. 宿主具备交互式另存能力 → 尝试另存对话框
/// 2. 用户取消 → Err(UserCancelled)，到此为止，不回退
/// 3. 其他交互式失败（无能力/权限/宿主错误）→ 静默回退自动下载
/// 4. 自动下载也失败 → Err(Io)
pub async fn save_workbook(
    surface: &dyn SaveSurface,
    buffer: &[u8],
    suggested_name: &str,
) -> ExchangeResult<SaveReport> {
    if surface.interactive_available() {
        match surface.save_interactive(buffer, suggested_name).await {
            Ok(path) => {
                info!(path = %path.display(), "交互式另存完成");
                return Ok(SaveReport {
                    mode: SaveMode::Interactive,
                    path,
                });
            }
            Err(InteractiveSaveError::Cancelled) => {
                info!("用户取消另存，保存流程终止");
                return Err(ExchangeError::UserCancelled);
            }
            Err(e) => {
                warn!(error = %e, "交互式另存失败，回退自动下载");
            }
        }
    }

    match surface.save_to_downloads(buffer, suggested_name).await {
        Ok(path) => {
            info!(path = %path.display(), "已写入默认下载目录");
            Ok(SaveReport {
                mode: SaveMode::DownloadDir,
                path,
            })
        }
        Err(e) => Err(ExchangeError::Io(e.to_string())),
    }
}

// ==========================================
// DownloadDirSurface - 默认下载目录宿主
// ==========================================
// 无交互能力的基础宿主实现：所有保存落到系统下载目录。
// 带另存对话框的桌面宿主由应用壳层注入。
pub struct DownloadDirSurface;

#[async_trait]
impl SaveSurface for DownloadDirSurface {
    fn interactive_available(&self) -> bool {
        false
    }

    async fn save_interactive(
        &self,
        _buffer: &[u8],
        _suggested_name: &str,
    ) -> Result<PathBuf, InteractiveSaveError> {
        Err(InteractiveSaveError::Unavailable(
            "当前宿主无另存对话框".to_string(),
        ))
    }

    async fn save_to_downloads(
        &self,
        buffer: &[u8],
        suggested_name: &str,
    ) -> Result<PathBuf, std::io::Error> {
        let dir = dirs::download_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "未找到系统下载目录")
        })?;
        let path = dir.join(suggested_name);
        tokio::fs::write(&path, buffer).await?;
        Ok(path)
    }
}
