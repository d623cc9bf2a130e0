use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    configs::{ParameterStoreConfig, StorageBackend},
    storage::{
        adapters::{LocalStore, SsmStore},
        repository::ParameterStoreBackend,
    },
};

pub struct ParameterStoreFactory {
    config: Arc<ParameterStoreConfig>,
}

impl ParameterStoreFactory {
    pub fn new(config: Arc<ParameterStoreConfig>) -> Self {
        Self { config }
    }

    pub async fn create(
        &self,
    ) -> Result<Arc<dyn ParameterStoreBackend>, Box<dyn std::error::Error + Send + Sync>> {
        let backend: Arc<dyn ParameterStoreBackend> =
            match self.config.storage_config.storage_backend {
                StorageBackend::Ssm => {
                    let ssm_config = self.config.storage_config.ssm_storage_config.clone();
                    info!(
                        region = ?ssm_config.region,
                        endpoint = ?ssm_config.endpoint_url,
                        "Using AWS SSM parameter store"
                    );
                    Arc::new(SsmStore::new(ssm_config).await)
                }
                StorageBackend::Local => {
                    warn!("Using in-memory parameter store. Values are lost on exit");
                    Arc::new(LocalStore::new())
                }
            };

        Ok(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{ServiceConfig, StorageConfig};

    #[tokio::test]
    async fn test_create_local_backend() {
        let config = ParameterStoreConfig {
            service_config: ServiceConfig::new("dev").unwrap(),
            storage_config: StorageConfig {
                storage_backend: StorageBackend::Local,
                ..Default::default()
            },
        };

        let backend = ParameterStoreFactory::new(Arc::new(config))
            .create()
            .await
            .unwrap();
        assert!(backend.get_parameter("/dev/missing", true).await.is_err());
    }
}
