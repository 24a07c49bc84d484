// ==========================================
// 进销存后台管理系统 - 工作簿解析器
// ==========================================
// 支持: Excel (.xlsx) / CSV (.csv)，按文件头自动识别
// 红线: 只读第一个工作表；第 1 行表头无条件跳过；
//       空白行保留（过滤是归一化层的职责），行号与源文件对齐
// ==========================================

use crate::exchange::error::{ExchangeError, ExchangeResult};
use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

// ==========================================
// RawCell / RawRow - 原始单元格与行
// ==========================================
// 生命周期: 仅在解析阶段存在，随后交给归一化层

/// 原始单元格值（弱类型）
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl RawCell {
    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }

    /// 按文本取值
    ///
    /// 整数值的数值单元格不带小数点输出（编码列常被 Excel
    /// 存成数值，"123.0" 会导致编码匹配失败）
    pub fn to_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            RawCell::Bool(b) => b.to_string(),
        }
    }

    /// 按数值取值（文本单元格尝试解析，失败返回 None）
    pub fn to_number(&self) -> Option<f64> {
        match self {
            RawCell::Number(n) => Some(*n),
            RawCell::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// 原始行: 单元格按列位置排列 + 1 基源文件行号
#[derive(Debug, Clone)]
pub struct RawRow {
    pub row_number: usize,
    pub cells: Vec<RawCell>,
}

impl RawRow {
    /// 取指定列的单元格（越界视为空单元格）
    pub fn cell(&self, col: usize) -> &RawCell {
        self.cells.get(col).unwrap_or(&RawCell::Empty)
    }
}

// ==========================================
// Excel 解析
// ==========================================

/// 从 xlsx 缓冲解析数据行
///
/// # 返回
/// - Ok(Vec<RawRow>): 第一个工作表的所有数据行（不含表头），
///   含完全空白的行
pub fn parse_workbook_rows(buffer: &[u8]) -> ExchangeResult<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(buffer))?;

    // 读取第一个 sheet
    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        return Err(ExchangeError::ExcelParse("文件无工作表".to_string()));
    }
    let sheet_name = sheet_names[0].clone();
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ExchangeError::ExcelParse(e.to_string()))?;

    let start_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

    let mut rows = Vec::new();
    for (idx, data_row) in range.rows().enumerate() {
        // 第 1 行为表头，无条件跳过
        if idx == 0 {
            continue;
        }
        rows.push(RawRow {
            row_number: start_row + idx + 1,
            cells: data_row.iter().map(to_raw_cell).collect(),
        });
    }

    Ok(rows)
}

fn to_raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => RawCell::Text(s.clone()),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(_) => RawCell::Empty,
    }
}

// ==========================================
// CSV 解析
// ==========================================

/// 从 CSV 缓冲解析数据行
///
/// 表头行同样跳过；字段首部的 UTF-8 BOM 容忍
pub fn parse_csv_rows(buffer: &[u8]) -> ExchangeResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // 允许行长度不一致
        .from_reader(buffer);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        if idx == 0 {
            continue;
        }
        let cells = record
            .iter()
            .map(|field| {
                let field = field.trim_start_matches('\u{feff}');
                if field.is_empty() {
                    RawCell::Empty
                } else {
                    RawCell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(RawRow {
            row_number: idx + 1,
            cells,
        });
    }

    Ok(rows)
}

// ==========================================
// 通用入口（按文件头自动识别格式）
// ==========================================

/// 解析导入缓冲为原始行
///
/// - ZIP 魔数 (PK..) → xlsx
/// - 其余文本内容 → CSV
/// - 含 NUL 的未知二进制 → 格式不支持
pub fn parse_rows(buffer: &[u8]) -> ExchangeResult<Vec<RawRow>> {
    if buffer.starts_with(b"PK\x03\x04") {
        return parse_workbook_rows(buffer);
    }
    if buffer.iter().take(512).any(|b| *b == 0) {
        return Err(ExchangeError::UnsupportedFormat(
            "未知二进制格式".to_string(),
        ));
    }
    parse_csv_rows(buffer)
}
