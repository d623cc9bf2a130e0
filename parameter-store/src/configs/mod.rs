pub mod loaders;
pub mod service;
pub mod storage;

pub use service::{DEFAULT_KMS_KEY_ID, ServiceConfig};
pub use storage::{SsmStorageConfig, StorageBackend, StorageConfig};

#[async_trait::async_trait]
pub trait Configs: Sized {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Clone)]
pub struct ParameterStoreConfig {
    pub service_config: ServiceConfig,
    pub storage_config: StorageConfig,
}

#[async_trait::async_trait]
impl Configs for ParameterStoreConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self {
            service_config: ServiceConfig::load().await?,
            storage_config: StorageConfig::load().await?,
        })
    }
}
