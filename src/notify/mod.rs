use async_trait::async_trait;
use serde::Serialize;

use crate::config::NotifyConfig;
use crate::error::BillingError;

/// 报表推送接口
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), BillingError>;
}

/// 本地调试模式: 正文直接写标准输出, 不推送
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn publish(&self, _subject: &str, message: &str) -> Result<(), BillingError> {
        print!("{message}");
        Ok(())
    }
}

/// 生产模式: 把 {subject, message} POST 到 topic endpoint
pub struct TopicNotifier {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct TopicMessage<'a> {
    subject: &'a str,
    message: &'a str,
}

impl TopicNotifier {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Notifier for TopicNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), BillingError> {
        tracing::info!("Pushing report to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TopicMessage { subject, message })
            .send()
            .await
            .map_err(|e| BillingError::Publish(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BillingError::Publish(format!(
                "topic endpoint returned {}",
                response.status()
            )));
        }
        tracing::info!("Report published, status {}", response.status());
        Ok(())
    }
}

/// 根据配置选择推送方式
pub fn create_notifier(config: &NotifyConfig) -> Result<Box<dyn Notifier>, BillingError> {
    if config.local_mode {
        return Ok(Box::new(StdoutNotifier));
    }
    let endpoint = config.topic_endpoint.clone().ok_or_else(|| {
        BillingError::Config(
            "NOTIFY_TOPIC_ENDPOINT is required when local mode is off".to_string(),
        )
    })?;
    Ok(Box::new(TopicNotifier::new(endpoint)))
}
