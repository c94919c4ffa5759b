use crate::storage::StorageError;

/// 任务级错误 - 任一变体都会终止本次执行, 不发布任何报表
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// 清单文件在推导路径下不存在
    #[error("manifest object not found: {0}")]
    ManifestNotFound(String),

    /// 账单文件在清单给出的位置不存在
    #[error("report object not found: {0}")]
    ReportNotFound(String),

    /// 清单引用的账单文件数不为1 (多分片账单不支持)
    #[error("unsupported report layout: manifest lists {0} report files, expected exactly 1")]
    UnsupportedReportLayout(usize),

    /// 账单解压或CSV解析失败
    #[error("malformed ledger: {0}")]
    MalformedLedger(String),

    /// 清单JSON解析失败
    #[error("malformed manifest: {0}")]
    MalformedManifest(#[from] serde_json::Error),

    /// 对象存储访问失败
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// 报表推送失败
    #[error("publish error: {0}")]
    Publish(String),

    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),
}
