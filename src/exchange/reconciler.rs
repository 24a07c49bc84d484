// ==========================================
// 进销存后台管理系统 - 导入对账器
// ==========================================
// 职责: 匹配结果合并进目标单据行集合 + 汇总行级诊断
// 红线: 逐行串行处理（共享累加集合，按键合并不能并发）；
//       单行失败不中断整批，失败行以诊断形式返回
// ==========================================

use crate::domain::DocumentLine;
use crate::exchange::error::ExchangeResult;
use crate::exchange::exchange_trait::CatalogGateway;
use crate::exchange::normalizer::ImportRow;
use crate::exchange::resolver::{resolve, MatchOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 行级诊断: 未成功匹配的导入行及其原因
///
/// 顺序与源文件行顺序一致；诊断从不阻止其余行生效
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportDiagnostic {
    pub row_number: usize, // 1 基源文件行号
    pub code: String,      // 导入行填写的编码
    pub reason: String,    // 人类可读原因
}

/// 对账结果统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileSummary {
    pub resolved_rows: usize, // 成功合并的行数
    pub failed_rows: usize,   // 产生诊断的行数
}

/// 将归一化导入行对账进目标集合
///
/// # 参数
/// - rows: 归一化导入行（按源文件顺序）
/// - catalog: 目录服务
/// - existing: 目标单据行集合（调用方持有；本函数按键合并写入）
///
/// # 合并规则
/// - 键 = (商品编码, 规格)；键已存在: 数量累加、单价以当前行覆盖
/// - 键不存在: 追加新行
///
/// # 返回
/// - Ok((诊断列表, 统计)): 目录查询正常时必定 Ok，
///   行级失败只出现在诊断列表中
/// - Err: 目录服务传输错误（中断整个操作）
pub async fn reconcile(
    rows: &[ImportRow],
    catalog: &dyn CatalogGateway,
    existing: &mut Vec<DocumentLine>,
) -> ExchangeResult<(Vec<ImportDiagnostic>, ReconcileSummary)> {
    let mut diagnostics = Vec::new();
    let mut summary = ReconcileSummary::default();

    // 串行逐行解析：诊断顺序与行顺序一致，且同批内重复键的
    // 合并不会发生丢失更新
    for row in rows {
        let outcome = resolve(catalog, &row.code, row.variant.as_deref()).await?;

        match outcome {
            MatchOutcome::Resolved(item) => {
                merge_line(existing, DocumentLine::from_item(&item, row.unit_price, row.quantity));
                summary.resolved_rows += 1;
            }
            MatchOutcome::NotFound => {
                push_diagnostic(&mut diagnostics, row, "商品编码不存在");
                summary.failed_rows += 1;
            }
            MatchOutcome::VariantRequired => {
                push_diagnostic(&mut diagnostics, row, "该编码对应多个规格，需填写规格型号");
                summary.failed_rows += 1;
            }
            MatchOutcome::VariantNotFound => {
                push_diagnostic(&mut diagnostics, row, "规格型号不存在");
                summary.failed_rows += 1;
            }
        }
    }

    Ok((diagnostics, summary))
}

// 按 (编码, 规格) 合并；命中时数量累加、单价覆盖
fn merge_line(existing: &mut Vec<DocumentLine>, incoming: DocumentLine) {
    let hit = existing
        .iter()
        .position(|line| line.code == incoming.code && line.variant() == incoming.variant());

    match hit {
        Some(idx) => {
            let line = &mut existing[idx];
            line.quantity += incoming.quantity;
            line.unit_price = incoming.unit_price;
        }
        None => existing.push(incoming),
    }
}

fn push_diagnostic(diagnostics: &mut Vec<ImportDiagnostic>, row: &ImportRow, reason: &str) {
    debug!(
        row_number = row.row_number,
        code = %row.code,
        reason = reason,
        "导入行未匹配"
    );
    diagnostics.push(ImportDiagnostic {
        row_number: row.row_number,
        code: row.code.clone(),
        reason: reason.to_string(),
    });
}
