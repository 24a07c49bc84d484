// ==========================================
// 进销存后台管理系统 - 导出列模板
// ==========================================
// 职责: 定义导出/导入文件的列结构（表头文本、取值键、列宽）
// 红线: 列顺序即文件列顺序；key 在同一模板内唯一
// ==========================================

/// 单列定义
///
/// - header: 表头行显示文本
/// - key: 记录投影键（生成器据此从记录取值）
/// - width: 列宽（Excel 字符宽度）
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub key: &'static str,
    pub width: f64,
}

impl ColumnSpec {
    pub const fn new(header: &'static str, key: &'static str, width: f64) -> Self {
        Self { header, key, width }
    }
}

// ==========================================
// 商品档案导出模板
// ==========================================
// 末尾固定保留 3 个图片列：即使没有图片数据也输出，
// 保证同版本模板的文件列数稳定。
pub fn item_export_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("商品编码", "code", 16.0),
        ColumnSpec::new("商品名称", "name", 28.0),
        ColumnSpec::new("规格型号", "variant", 14.0),
        ColumnSpec::new("单位", "unit", 8.0),
        ColumnSpec::new("进货价", "purchase_price", 10.0),
        ColumnSpec::new("零售价", "retail_price", 10.0),
        ColumnSpec::new("库存", "stock_qty", 10.0),
        ColumnSpec::new("备注", "remark", 24.0),
        ColumnSpec::new("图片1", "image1", 30.0),
        ColumnSpec::new("图片2", "image2", 30.0),
        ColumnSpec::new("图片3", "image3", 30.0),
    ]
}

// ==========================================
// 单据行导入模板
// ==========================================
// 导入文件按列位置取值（不按表头文本匹配），
// 下列常量即为各字段所在列的下标。
pub fn line_import_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("商品编码", "code", 16.0),
        ColumnSpec::new("规格型号", "variant", 14.0),
        ColumnSpec::new("进货价", "unit_price", 10.0),
        ColumnSpec::new("数量", "quantity", 10.0),
    ]
}

/// 导入列下标: 商品编码（必填）
pub const IMPORT_COL_CODE: usize = 0;
/// 导入列下标: 规格型号（可空）
pub const IMPORT_COL_VARIANT: usize = 1;
/// 导入列下标: 进货价（解析失败取 0）
pub const IMPORT_COL_PRICE: usize = 2;
/// 导入列下标: 数量（解析失败取 1）
pub const IMPORT_COL_QTY: usize = 3;

/// 进货价解析失败时的默认值
pub const DEFAULT_UNIT_PRICE: f64 = 0.0;
/// 数量解析失败时的默认值
pub const DEFAULT_QUANTITY: f64 = 1.0;
