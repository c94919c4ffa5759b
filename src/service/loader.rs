use bigdecimal::BigDecimal;
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::ReportConfig;
use crate::error::BillingError;
use crate::models::{BillingPeriod, Ledger, LineItem, ReportManifest};
use crate::storage::ObjectFetcher;

/// CSV行的反序列化视图, 只消费5个固定列, 其余列忽略
#[derive(Debug, Deserialize)]
struct RawLineItem {
    #[serde(rename = "identity/LineItemId")]
    line_item_id: String,
    #[serde(rename = "product/ProductName")]
    product_name: String,
    #[serde(rename = "product/productFamily")]
    product_family: String,
    #[serde(rename = "resourceTags/user:PID")]
    project_tag: Option<String>,
    #[serde(rename = "lineItem/UnblendedCost")]
    unblended_cost: BigDecimal,
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        Self {
            line_item_id: raw.line_item_id,
            product_name: raw.product_name,
            product_family: raw.product_family,
            // 空串/空白标签视同未打标签, 不能当成一个独立标签值
            project_tag: raw.project_tag.filter(|t| !t.trim().is_empty()),
            unblended_cost: raw.unblended_cost,
        }
    }
}

/// 账单加载服务
pub struct LedgerLoader {
    store: Arc<dyn ObjectFetcher>,
    config: ReportConfig,
}

impl LedgerLoader {
    pub fn new(store: Arc<dyn ObjectFetcher>, config: ReportConfig) -> Self {
        Self { store, config }
    }

    /// 拉取并解码指定账期的完整账单
    pub async fn load(&self, period: &BillingPeriod) -> Result<Ledger, BillingError> {
        // 1. 由账期推导清单路径
        let file_path = format!("{}/{}/", self.config.path_prefix, period.date_range());
        let manifest_key = format!("{}{}", file_path, self.config.manifest_file_name);

        // 2. 下载并解析清单
        tracing::info!("Downloading manifest file {}", manifest_key);
        let manifest_bytes = self
            .store
            .get(&manifest_key)
            .await?
            .ok_or_else(|| BillingError::ManifestNotFound(manifest_key.clone()))?;
        tracing::info!("{} bytes received", manifest_bytes.len());
        let manifest: ReportManifest = serde_json::from_slice(&manifest_bytes)?;

        // 3. 清单必须且只能引用一个账单文件
        let report_key = manifest.sole_report_key()?;

        // 4. 下载账单文件
        tracing::info!("Downloading report file {}", report_key);
        let report_bytes = self
            .store
            .get(report_key)
            .await?
            .ok_or_else(|| BillingError::ReportNotFound(report_key.to_string()))?;
        tracing::info!("{} bytes received", report_bytes.len());

        // 5. 解压并解码成明细行
        tracing::info!("Decoding report into line items");
        decode_ledger(&report_bytes)
    }
}

/// gzip解压 + 带表头CSV解码
fn decode_ledger(raw: &[u8]) -> Result<Ledger, BillingError> {
    let decoder = GzDecoder::new(raw);
    let mut reader = csv::Reader::from_reader(decoder);

    let mut items: Ledger = Vec::new();
    for record in reader.deserialize::<RawLineItem>() {
        let raw_item = record.map_err(|e| BillingError::MalformedLedger(e.to_string()))?;
        items.push(raw_item.into());
    }
    Ok(items)
}
