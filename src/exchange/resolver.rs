// ==========================================
// 进销存后台管理系统 - 记录匹配器
// ==========================================
// 职责: 导入行 → 目录候选记录的匹配判定
// 红线: 匹配结果是四态封闭联合，不是 found/not-found 布尔：
//       "缺少必填规格"与"规格填错"是两种操作员可处理的不同情况，
//       合并会降低诊断质量
// ==========================================

use crate::domain::CatalogItem;
use crate::exchange::error::{ExchangeError, ExchangeResult};
use crate::exchange::exchange_trait::CatalogGateway;

/// 匹配结果
///
/// 每行恰好一个标签；Resolved 携带命中的商品档案，
/// 三个失败标签由对账层转换为行级诊断而不是异常
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    /// 命中唯一候选
    Resolved(CatalogItem),
    /// 编码无候选
    NotFound,
    /// 编码存在多个带规格候选且无裸候选，但导入行未填规格
    VariantRequired,
    /// 导入行填写的规格在候选集中不存在
    VariantNotFound,
}

/// 按编码（+ 可选规格）匹配目录记录
///
/// # 参数
/// - catalog: 目录服务
/// - code: 商品编码（与主编码或任一别名大小写不敏感比较）
/// - variant: 规格型号（可选）
///
/// # 判定顺序
/// 1. 候选集为空 → NotFound
/// 2. 填写了规格: 按规格名大小写不敏感查找，命中 → Resolved；
///    未命中但存在无规格维度的候选 → 规格视为多余输入，忽略并
///    Resolved 该候选；否则 → VariantNotFound
/// 3. 未填规格: 存在无规格维度的候选 → Resolved（取第一个）；
///    候选全部带规格 → VariantRequired
pub async fn resolve(
    catalog: &dyn CatalogGateway,
    code: &str,
    variant: Option<&str>,
) -> ExchangeResult<MatchOutcome> {
    let needle = code.trim().to_lowercase();

    let candidates: Vec<CatalogItem> = catalog
        .search(code)
        .await
        .map_err(|e| ExchangeError::CatalogQuery(e.to_string()))?
        .into_iter()
        .filter(|item| code_matches(item, &needle))
        .collect();

    if candidates.is_empty() {
        return Ok(MatchOutcome::NotFound);
    }

    let variant = variant.map(str::trim).filter(|v| !v.is_empty());

    if let Some(wanted) = variant {
        let wanted = wanted.to_lowercase();
        if let Some(hit) = candidates
            .iter()
            .find(|item| item.variant().map(|v| v.to_lowercase()).as_deref() == Some(wanted.as_str()))
        {
            return Ok(MatchOutcome::Resolved(hit.clone()));
        }
        // 候选本身没有规格维度时，导入行多填的规格按多余输入忽略
        if let Some(bare) = candidates.iter().find(|item| !item.has_variant()) {
            return Ok(MatchOutcome::Resolved(bare.clone()));
        }
        return Ok(MatchOutcome::VariantNotFound);
    }

    match candidates.iter().find(|item| !item.has_variant()) {
        Some(bare) => Ok(MatchOutcome::Resolved(bare.clone())),
        None => Ok(MatchOutcome::VariantRequired),
    }
}

// 主编码或任一别名命中即视为匹配
fn code_matches(item: &CatalogItem, needle: &str) -> bool {
    if item.code.trim().to_lowercase() == needle {
        return true;
    }
    item.aliases
        .iter()
        .any(|alias| alias.trim().to_lowercase() == needle)
}
