use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub report: ReportConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 存储后端: "s3" 或 "local"
    pub provider: String,
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// 账单文件所在前缀, 如 costandusagereports/MyCostAndUsageReport
    pub path_prefix: String,
    pub manifest_file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// 本地调试模式: 报表直接写到标准输出, 不推送
    pub local_mode: bool,
    pub topic_endpoint: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                provider: "s3".to_string(),
                bucket: "gw.ops".to_string(),
                region: None,
                endpoint: None,
                access_key_id: None,
                secret_access_key: None,
            },
            report: ReportConfig {
                path_prefix: "costandusagereports/MyCostAndUsageReport".to_string(),
                manifest_file_name: "MyCostAndUsageReport-Manifest.json".to_string(),
            },
            notify: NotifyConfig {
                local_mode: true,
                topic_endpoint: None,
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            storage: StorageConfig {
                provider: std::env::var("STORAGE_PROVIDER")
                    .unwrap_or(defaults.storage.provider),
                bucket: std::env::var("STORAGE_BUCKET").unwrap_or(defaults.storage.bucket),
                region: std::env::var("STORAGE_REGION").ok(),
                endpoint: std::env::var("STORAGE_ENDPOINT").ok(),
                access_key_id: std::env::var("STORAGE_ACCESS_KEY_ID").ok(),
                secret_access_key: std::env::var("STORAGE_SECRET_ACCESS_KEY").ok(),
            },
            report: ReportConfig {
                path_prefix: std::env::var("REPORT_PATH_PREFIX")
                    .unwrap_or(defaults.report.path_prefix),
                manifest_file_name: std::env::var("REPORT_MANIFEST_FILE_NAME")
                    .unwrap_or(defaults.report.manifest_file_name),
            },
            notify: NotifyConfig {
                local_mode: std::env::var("NOTIFY_LOCAL_MODE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.notify.local_mode),
                topic_endpoint: std::env::var("NOTIFY_TOPIC_ENDPOINT").ok(),
            },
        }
    }
}
