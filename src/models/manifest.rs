use serde::Deserialize;

use crate::error::BillingError;

/// 清单文件 (JSON) 的反序列化视图, 其余字段忽略
#[derive(Debug, Clone, Deserialize)]
pub struct ReportManifest {
    #[serde(rename = "reportKeys")]
    pub report_keys: Vec<String>,
}

impl ReportManifest {
    /// 取唯一的账单文件key; 清单引用0个或多个文件时拒绝
    pub fn sole_report_key(&self) -> Result<&str, BillingError> {
        match self.report_keys.as_slice() {
            [key] => Ok(key),
            keys => Err(BillingError::UnsupportedReportLayout(keys.len())),
        }
    }
}
