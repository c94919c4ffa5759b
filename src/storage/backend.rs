use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::StorageConfig;

/// 对象存储错误
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage configuration error: {0}")]
    Config(String),

    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid object key: {0}")]
    InvalidKey(String),
}

/// 按key拉取对象的只读接口
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// 对象不存在时返回 None, 由调用方决定是否致命
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StorageError>;
}

/// 基于 object_store 的存储后端
struct StorageBackend {
    store: Arc<dyn ObjectStore>,
}

/// 根据配置构建存储后端: "s3" 为生产, "local" 用于本地运行与测试
pub fn create_store(config: &StorageConfig) -> Result<Arc<dyn ObjectFetcher>, StorageError> {
    let store: Arc<dyn ObjectStore> = match config.provider.as_str() {
        "s3" => {
            let mut builder = AmazonS3Builder::new().with_bucket_name(&config.bucket);

            if let Some(ref region) = config.region {
                builder = builder.with_region(region);
            }
            if let Some(ref endpoint) = config.endpoint {
                builder = builder.with_endpoint(endpoint);
            }
            if let Some(ref access_key) = config.access_key_id {
                builder = builder.with_access_key_id(access_key);
            }
            if let Some(ref secret_key) = config.secret_access_key {
                builder = builder.with_secret_access_key(secret_key);
            }

            Arc::new(builder.build()?)
        }
        "local" => {
            let path = PathBuf::from(&config.bucket);
            std::fs::create_dir_all(&path)?;
            Arc::new(LocalFileSystem::new_with_prefix(path)?)
        }
        other => {
            return Err(StorageError::Config(format!(
                "unknown storage provider: {other}"
            )))
        }
    };

    Ok(Arc::new(StorageBackend { store }))
}

#[async_trait]
impl ObjectFetcher for StorageBackend {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StorageError> {
        let path =
            ObjectPath::parse(key).map_err(|e| StorageError::InvalidKey(e.to_string()))?;

        match self.store.get(&path).await {
            Ok(result) => Ok(Some(result.bytes().await?)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
