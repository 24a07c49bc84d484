// ==========================================
// 进销存后台管理系统 - 工作簿生成器
// ==========================================
// 职责: 列模板 + 记录序列 → 带样式的 xlsx 二进制缓冲
// 红线: 生成器不感知文件名与保存方式；同一输入生成字节一致的文件
// ==========================================

use crate::domain::CatalogItem;
use crate::exchange::error::ExchangeResult;
use crate::exchange::schema::ColumnSpec;
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook,
};

/// 表头填充色（深蓝底白字）
const HEADER_FILL_COLOR: u32 = 0x4472C4;
/// 表头行高
const HEADER_ROW_HEIGHT: f64 = 22.0;

/// 单元格取值
///
/// 数值列与文本列的样式不同（数值居中），生成器按投影结果的
/// 类型选择样式，列模板无需声明类型。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    fn text(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// 商品档案按列键投影为单元格值
///
/// 缺失的自由文本字段输出空串，保持各行列数一致；
/// 未知键同样输出空串而不是报错（模板演进时旧代码可读新模板）
pub fn project_item(item: &CatalogItem, key: &str) -> CellValue {
    match key {
        "code" => CellValue::text(&item.code),
        "name" => CellValue::text(&item.name),
        "variant" => CellValue::text(item.variant().unwrap_or("")),
        "unit" => CellValue::text(item.unit.as_deref().unwrap_or("")),
        "purchase_price" => CellValue::Number(item.purchase_price),
        "retail_price" => CellValue::Number(item.retail_price),
        "stock_qty" => CellValue::Number(item.stock_qty),
        "remark" => CellValue::text(item.remark.as_deref().unwrap_or("")),
        "image1" => CellValue::text(item.image_urls.first().map(String::as_str).unwrap_or("")),
        "image2" => CellValue::text(item.image_urls.get(1).map(String::as_str).unwrap_or("")),
        "image3" => CellValue::text(item.image_urls.get(2).map(String::as_str).unwrap_or("")),
        _ => CellValue::text(""),
    }
}

/// 生成单 sheet 的商品工作簿
///
/// # 参数
/// - sheet_name: 工作表名
/// - columns: 列模板（顺序即文件列顺序）
/// - items: 记录序列（每条记录一行，从第 2 行起）
///
/// # 返回
/// - Ok(Vec<u8>): xlsx 二进制缓冲，可直接交给保存策略
///
/// # 样式
/// - 第 1 行表头: 加粗、深底白字、水平垂直居中、固定行高、全列边框
///   （含末尾的图片占位列，保证表格网格完整）
/// - 数据行: 全部细边框；数值单元格居中
/// - 表头行冻结（滚动时保持可见）
pub fn generate_item_workbook(
    sheet_name: &str,
    columns: &[ColumnSpec],
    items: &[CatalogItem],
) -> ExchangeResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    // 固定文档创建时间：同一输入必须生成字节一致的文件
    let created = ExcelDateTime::from_ymd(2024, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL_COLOR))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    let text_format = Format::new().set_border(FormatBorder::Thin);
    let number_format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    // 表头行
    for (col_idx, column) in columns.iter().enumerate() {
        let col = col_idx as u16;
        sheet.set_column_width(col, column.width)?;
        sheet.write_string_with_format(0, col, column.header, &header_format)?;
    }
    sheet.set_row_height(0, HEADER_ROW_HEIGHT)?;
    sheet.set_freeze_panes(1, 0)?;

    // 数据行
    for (row_idx, item) in items.iter().enumerate() {
        let row = row_idx as u32 + 1;
        for (col_idx, column) in columns.iter().enumerate() {
            let col = col_idx as u16;
            match project_item(item, column.key) {
                CellValue::Text(value) => {
                    sheet.write_string_with_format(row, col, &value, &text_format)?;
                }
                CellValue::Number(value) => {
                    sheet.write_number_with_format(row, col, value, &number_format)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::schema::item_export_columns;

    fn sample_item(code: &str, stock: f64) -> CatalogItem {
        CatalogItem {
            item_id: format!("I-{}", code),
            code: code.to_string(),
            aliases: vec![],
            name: format!("商品{}", code),
            variant_name: None,
            unit: Some("件".to_string()),
            purchase_price: 10.0,
            retail_price: 15.0,
            stock_qty: stock,
            remark: None,
            image_urls: vec![],
        }
    }

    #[test]
    fn test_generate_returns_nonempty_buffer() {
        let items = vec![sample_item("A1", 5.0)];
        let buffer =
            generate_item_workbook("商品档案", &item_export_columns(), &items).unwrap();
        assert!(!buffer.is_empty());
        // xlsx 是 ZIP 容器
        assert_eq!(&buffer[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let items = vec![sample_item("A1", 5.0), sample_item("B2", 0.0)];
        let columns = item_export_columns();
        let first = generate_item_workbook("商品档案", &columns, &items).unwrap();
        let second = generate_item_workbook("商品档案", &columns, &items).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_header_only_for_empty_records() {
        let buffer =
            generate_item_workbook("商品档案", &item_export_columns(), &[]).unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_project_missing_fields_default() {
        let mut item = sample_item("A1", 0.0);
        item.remark = None;
        item.image_urls = vec!["http://img/1.png".to_string()];

        assert_eq!(project_item(&item, "remark"), CellValue::Text(String::new()));
        assert_eq!(project_item(&item, "stock_qty"), CellValue::Number(0.0));
        assert_eq!(
            project_item(&item, "image1"),
            CellValue::Text("http://img/1.png".to_string())
        );
        assert_eq!(project_item(&item, "image2"), CellValue::Text(String::new()));
    }
}
