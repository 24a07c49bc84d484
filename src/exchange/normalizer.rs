// ==========================================
// 进销存后台管理系统 - 行归一化器
// ==========================================
// 职责: 原始行 → 类型化导入行（TRIM / 空串转 NULL / 数值兜底）
// 红线: 编码为空的行直接丢弃且不产生诊断（视为文件尾部的空白填充）；
//       数值解析失败取默认值而不是拒绝整行
// ==========================================

use crate::exchange::parser::RawRow;
use crate::exchange::schema::{
    DEFAULT_UNIT_PRICE, IMPORT_COL_CODE, IMPORT_COL_PRICE, IMPORT_COL_QTY, IMPORT_COL_VARIANT,
};
use serde::{Deserialize, Serialize};

/// 归一化后的导入行
///
/// 不变式: unit_price 与 quantity 为有限非负数；
/// variant 去除首尾空白后非空，否则为 None
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRow {
    pub row_number: usize,       // 1 基源文件行号（诊断定位用）
    pub code: String,            // 商品编码（已 TRIM，非空）
    pub variant: Option<String>, // 规格型号（空串归一化为 None）
    pub unit_price: f64,         // 进货价（解析失败取 0）
    pub quantity: f64,           // 数量（解析失败取默认值）
}

/// 归一化单行
///
/// # 参数
/// - raw: 解析层产出的原始行
/// - default_quantity: 数量列缺失/非法时的默认值
///
/// # 返回
/// - Some(ImportRow): 行有效
/// - None: 编码列空白，整行丢弃（不是错误）
pub fn normalize(raw: &RawRow, default_quantity: f64) -> Option<ImportRow> {
    let code = raw.cell(IMPORT_COL_CODE).to_text().trim().to_string();
    if code.is_empty() {
        return None;
    }

    let variant = {
        let text = raw.cell(IMPORT_COL_VARIANT).to_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    Some(ImportRow {
        row_number: raw.row_number,
        code,
        variant,
        unit_price: sanitize_number(raw, IMPORT_COL_PRICE).unwrap_or(DEFAULT_UNIT_PRICE),
        quantity: sanitize_number(raw, IMPORT_COL_QTY).unwrap_or(default_quantity),
    })
}

/// 批量归一化（丢弃空行）
pub fn normalize_rows(rows: &[RawRow], default_quantity: f64) -> Vec<ImportRow> {
    rows.iter()
        .filter_map(|row| normalize(row, default_quantity))
        .collect()
}

// 负数与非有限值一律视为解析失败，由调用方取默认值兜底
fn sanitize_number(raw: &RawRow, col: usize) -> Option<f64> {
    raw.cell(col)
        .to_number()
        .filter(|n| n.is_finite() && *n >= 0.0)
}
