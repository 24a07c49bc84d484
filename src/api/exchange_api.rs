// ==========================================
// 进销存后台管理系统 - 表格交换API
// ==========================================
// 职责: 封装导出/导入业务接口，供上层界面调用
// 流程: 导出 = 生成 → (引擎加载) → 保存策略
//       导入 = 解析 → 归一化 → 目录匹配 → 对账合并
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ExchangeConfigReader;
use crate::domain::{CatalogItem, DocumentLine};
use crate::exchange::{
    generate_item_workbook, item_export_columns, line_import_columns, normalize_rows, parse_rows,
    reconcile, save_workbook, CatalogGateway, ColumnSpec, FormatEngineLoader, ImportDiagnostic,
    SaveMode, SaveSurface, XlsxFormatEngine,
};
use crate::i18n;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;

/// 导入模板的工作表名
const TEMPLATE_SHEET_NAME: &str = "导入模板";
/// 导入模板的文件名前缀
const TEMPLATE_FILE_PREFIX: &str = "单据导入模板";

/// 导出API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportApiResponse {
    /// 建议文件名（含时间戳）
    pub file_name: String,
    /// 实际写入路径
    pub saved_path: String,
    /// 实际使用的保存路径类型
    pub save_mode: SaveMode,
    /// 导出记录数
    pub row_count: usize,
    /// 导出耗时（毫秒）
    pub elapsed_ms: i64,
    /// 结果说明
    pub message: String,
}

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 批次ID（诊断追溯用）
    pub batch_id: String,
    /// 文件数据行总数（含空白行）
    pub total_rows: usize,
    /// 归一化后的有效行数
    pub parsed_rows: usize,
    /// 成功合并的行数
    pub merged_rows: usize,
    /// 产生诊断的行数
    pub failed_rows: usize,
    /// 合并后的单据行集合
    pub lines: Vec<DocumentLine>,
    /// 行级诊断明细（用于前端生成摘要/定位问题）
    pub diagnostics: Vec<ImportDiagnostic>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
    /// 结果说明
    pub message: String,
}

/// 表格交换API
pub struct ExchangeApi {
    catalog: Arc<dyn CatalogGateway>,
    surface: Arc<dyn SaveSurface>,
    config: Arc<dyn ExchangeConfigReader>,
    loader: Arc<FormatEngineLoader>,
}

impl ExchangeApi {
    /// 创建新的 ExchangeApi 实例
    ///
    /// # 参数
    /// - catalog: 商品目录服务
    /// - surface: 宿主文件保存能力
    /// - config: 配置读取器
    pub fn new(
        catalog: Arc<dyn CatalogGateway>,
        surface: Arc<dyn SaveSurface>,
        config: Arc<dyn ExchangeConfigReader>,
    ) -> Self {
        Self {
            catalog,
            surface,
            config,
            loader: Arc::new(FormatEngineLoader::new(Arc::new(XlsxFormatEngine))),
        }
    }

    /// 使用指定加载器创建（测试注入用）
    pub fn with_loader(
        catalog: Arc<dyn CatalogGateway>,
        surface: Arc<dyn SaveSurface>,
        config: Arc<dyn ExchangeConfigReader>,
        loader: Arc<FormatEngineLoader>,
    ) -> Self {
        Self {
            catalog,
            surface,
            config,
            loader,
        }
    }

    /// 导出商品档案
    ///
    /// # 参数
    /// - items: 待导出的商品记录
    ///
    /// # 返回
    /// - Ok(ExportApiResponse): 导出完成
    /// - Err(ApiError::Cancelled): 用户取消另存（调用方静默处理）
    /// - Err(其他): 生成/写入失败
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn export_items(&self, items: &[CatalogItem]) -> ApiResult<ExportApiResponse> {
        let sheet_name = self.config.get_export_sheet_name().await?;
        let prefix = self.config.get_export_file_prefix().await?;
        self.export_workbook(&sheet_name, &prefix, &item_export_columns(), items, "exchange.export_success")
            .await
    }

    /// 下载单据行导入模板（仅表头）
    #[instrument(skip(self))]
    pub async fn export_line_template(&self) -> ApiResult<ExportApiResponse> {
        self.export_workbook(
            TEMPLATE_SHEET_NAME,
            TEMPLATE_FILE_PREFIX,
            &line_import_columns(),
            &[],
            "exchange.template_success",
        )
        .await
    }

    async fn export_workbook(
        &self,
        sheet_name: &str,
        file_prefix: &str,
        columns: &[ColumnSpec],
        items: &[CatalogItem],
        message_key: &str,
    ) -> ApiResult<ExportApiResponse> {
        let start = Instant::now();

        self.loader.ensure_loaded().await?;
        let buffer = generate_item_workbook(sheet_name, columns, items)?;

        // 时间戳只进文件名，不进文件内容
        let file_name = format!("{}_{}.xlsx", file_prefix, Local::now().format("%Y%m%d_%H%M%S"));
        let report = save_workbook(self.surface.as_ref(), &buffer, &file_name).await?;

        let elapsed_ms = start.elapsed().as_millis() as i64;
        info!(
            file_name = %file_name,
            save_mode = ?report.mode,
            row_count = items.len(),
            elapsed_ms = elapsed_ms,
            "导出完成"
        );

        Ok(ExportApiResponse {
            file_name,
            saved_path: report.path.display().to_string(),
            save_mode: report.mode,
            row_count: items.len(),
            elapsed_ms,
            message: i18n::t(message_key),
        })
    }

    /// 导入单据行
    ///
    /// # 参数
    /// - buffer: 导入文件二进制缓冲（.xlsx 或 .csv）
    /// - existing: 目标单据行集合（调用方当前的草稿行）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 合并后的集合 + 行级诊断；
    ///   部分行失败不影响其余行生效
    /// - Err: 解析失败、行数超限、目录服务错误
    #[instrument(skip(self, buffer, existing), fields(bytes = buffer.len()))]
    pub async fn import_workbook(
        &self,
        buffer: &[u8],
        existing: Vec<DocumentLine>,
    ) -> ApiResult<ImportApiResponse> {
        let start = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, "开始导入单据行");

        self.loader.ensure_loaded().await?;

        // === 步骤 1: 解析文件 ===
        let raw_rows = parse_rows(buffer)?;
        let max_rows = self.config.get_max_import_rows().await?;
        if raw_rows.len() > max_rows {
            return Err(ApiError::ValidationError(i18n::t_with_args(
                "exchange.too_many_rows",
                &[("max", &max_rows.to_string())],
            )));
        }

        // === 步骤 2: 行归一化 ===
        let default_quantity = self.config.get_default_import_quantity().await?;
        let rows = normalize_rows(&raw_rows, default_quantity);

        // === 步骤 3: 目录匹配 + 对账合并 ===
        let mut lines = existing;
        let (diagnostics, summary) = reconcile(&rows, self.catalog.as_ref(), &mut lines).await?;

        let elapsed_ms = start.elapsed().as_millis() as i64;
        let message = i18n::t_with_args(
            "exchange.import_summary",
            &[
                ("total", &raw_rows.len().to_string()),
                ("merged", &summary.resolved_rows.to_string()),
                ("failed", &summary.failed_rows.to_string()),
            ],
        );
        info!(
            batch_id = %batch_id,
            total_rows = raw_rows.len(),
            parsed_rows = rows.len(),
            merged_rows = summary.resolved_rows,
            failed_rows = summary.failed_rows,
            elapsed_ms = elapsed_ms,
            "导入完成"
        );

        Ok(ImportApiResponse {
            batch_id,
            total_rows: raw_rows.len(),
            parsed_rows: rows.len(),
            merged_rows: summary.resolved_rows,
            failed_rows: summary.failed_rows,
            lines,
            diagnostics,
            elapsed_ms,
            message,
        })
    }
}
