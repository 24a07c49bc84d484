// ==========================================
// 进销存后台管理系统 - 集成测试辅助
// ==========================================
// 职责: 假目录服务 / 记录式保存宿主 / 测试数据构造
// ==========================================
#![allow(dead_code)]

use async_trait::async_trait;
use jxc_backoffice::exchange::{CatalogGateway, InteractiveSaveError, SaveSurface};
use jxc_backoffice::CatalogItem;
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ==========================================
// 测试数据构造
// ==========================================

/// 构造商品档案记录
pub fn catalog_item(code: &str, variant: Option<&str>) -> CatalogItem {
    CatalogItem {
        item_id: format!("I-{}-{}", code, variant.unwrap_or("-")),
        code: code.to_string(),
        aliases: vec![],
        name: format!("商品{}", code),
        variant_name: variant.map(str::to_string),
        unit: Some("件".to_string()),
        purchase_price: 10.0,
        retail_price: 15.0,
        stock_qty: 5.0,
        remark: None,
        image_urls: vec![],
    }
}

/// 构造导入工作簿（自动附加标准表头行）
///
/// rows: 每行 [编码, 规格, 进货价, 数量]
pub fn build_import_xlsx(rows: &[[&str; 4]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = ["商品编码", "规格型号", "进货价", "数量"];
    for (c, header) in headers.iter().enumerate() {
        sheet.write_string(0, c as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet.write_string(r as u32 + 1, c as u16, *value).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

// ==========================================
// MockCatalog - 内存假目录服务
// ==========================================
pub struct MockCatalog {
    items: HashMap<String, Vec<CatalogItem>>,
    /// 记录 search 调用次数
    pub search_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut map: HashMap<String, Vec<CatalogItem>> = HashMap::new();
        for item in items {
            map.entry(item.code.to_lowercase()).or_default().push(item.clone());
            for alias in &item.aliases {
                map.entry(alias.to_lowercase()).or_default().push(item.clone());
            }
        }
        Self {
            items: map,
            search_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CatalogGateway for MockCatalog {
    async fn search(&self, code: &str) -> anyhow::Result<Vec<CatalogItem>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .get(&code.trim().to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

// ==========================================
// ScriptedSurface - 记录式保存宿主
// ==========================================

/// 交互式另存路径的脚本化行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveBehavior {
    /// 无交互能力
    Unavailable,
    /// 另存成功
    Succeed,
    /// 用户取消
    Cancel,
    /// 能力性失败（触发回退）
    Fail,
}

pub struct ScriptedSurface {
    behavior: InteractiveBehavior,
    /// 已写入的 (文件名, 字节数) 记录（含两条路径）
    pub writes: Mutex<Vec<(String, usize)>>,
    pub interactive_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
}

impl ScriptedSurface {
    pub fn new(behavior: InteractiveBehavior) -> Self {
        Self {
            behavior,
            writes: Mutex::new(Vec::new()),
            interactive_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl SaveSurface for ScriptedSurface {
    fn interactive_available(&self) -> bool {
        self.behavior != InteractiveBehavior::Unavailable
    }

    async fn save_interactive(
        &self,
        buffer: &[u8],
        suggested_name: &str,
    ) -> Result<PathBuf, InteractiveSaveError> {
        self.interactive_calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            InteractiveBehavior::Succeed => {
                self.writes
                    .lock()
                    .unwrap()
                    .push((suggested_name.to_string(), buffer.len()));
                Ok(PathBuf::from("/chosen").join(suggested_name))
            }
            InteractiveBehavior::Cancel => Err(InteractiveSaveError::Cancelled),
            InteractiveBehavior::Fail => {
                Err(InteractiveSaveError::Failed("宿主拒绝".to_string()))
            }
            InteractiveBehavior::Unavailable => Err(InteractiveSaveError::Unavailable(
                "无另存对话框".to_string(),
            )),
        }
    }

    async fn save_to_downloads(
        &self,
        buffer: &[u8],
        suggested_name: &str,
    ) -> Result<PathBuf, std::io::Error> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        self.writes
            .lock()
            .unwrap()
            .push((suggested_name.to_string(), buffer.len()));
        Ok(PathBuf::from("/downloads").join(suggested_name))
    }
}
