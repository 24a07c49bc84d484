// ==========================================
// 进销存后台管理系统 - 商品领域模型
// ==========================================
// 职责: 商品档案与单据行实体定义
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CatalogItem - 商品档案
// ==========================================
// 用途: 目录服务返回的候选记录；导出层只读
// 说明: 同一商品编码可对应多个规格（variant_name 区分），
//       也可能完全没有规格维度（variant_name 为 None）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    // ===== 主键 =====
    pub item_id: String, // 商品唯一标识

    // ===== 编码 =====
    pub code: String, // 商品编码
    #[serde(default)]
    pub aliases: Vec<String>, // 编码别名（条码/旧编码）

    // ===== 基础信息 =====
    pub name: String,                 // 商品名称
    pub variant_name: Option<String>, // 规格型号（同编码多规格时区分）
    pub unit: Option<String>,         // 计量单位

    // ===== 价格与库存 =====
    pub purchase_price: f64, // 进货价
    pub retail_price: f64,   // 零售价
    pub stock_qty: f64,      // 库存数量

    // ===== 附加信息 =====
    pub remark: Option<String>, // 备注
    #[serde(default)]
    pub image_urls: Vec<String>, // 图片链接（导出占位列，最多 3 个）
}

impl CatalogItem {
    /// 规格型号（去除首尾空白；空白视为无规格）
    pub fn variant(&self) -> Option<&str> {
        self.variant_name
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// 是否带规格维度
    pub fn has_variant(&self) -> bool {
        self.variant().is_some()
    }
}

// ==========================================
// DocumentLine - 单据行（导入目标集合的元素）
// ==========================================
// 用途: 采购单/入库单草稿行；导入对账层按 (编码, 规格) 合并写入
// 说明: 仅为本地暂存编辑，落库由单据保存流程另行提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLine {
    pub item_id: String,              // 商品唯一标识
    pub code: String,                 // 商品编码
    pub name: String,                 // 商品名称
    pub variant_name: Option<String>, // 规格型号
    pub unit: Option<String>,         // 计量单位
    pub unit_price: f64,              // 单价（同键重复行以最后一行为准）
    pub quantity: f64,                // 数量（同键重复行累加）
}

impl DocumentLine {
    /// 由商品档案构造单据行
    pub fn from_item(item: &CatalogItem, unit_price: f64, quantity: f64) -> Self {
        Self {
            item_id: item.item_id.clone(),
            code: item.code.clone(),
            name: item.name.clone(),
            variant_name: item.variant().map(str::to_string),
            unit: item.unit.clone(),
            unit_price,
            quantity,
        }
    }

    /// 合并键中的规格部分（去空白；空白视为无规格）
    pub fn variant(&self) -> Option<&str> {
        self.variant_name
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
