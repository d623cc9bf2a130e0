use super::{
    Configs,
    loaders::environment::{env_or, first_env, optional_env},
};

const DEFAULT_STORAGE_BACKEND: &str = "ssm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Ssm,
    Local,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ssm" | "aws" | "parameter_store" => Ok(Self::Ssm),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SsmStorageConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub storage_backend: StorageBackend,
    pub ssm_storage_config: SsmStorageConfig,
}

#[async_trait::async_trait]
impl Configs for SsmStorageConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(SsmStorageConfig {
            region: optional_env("AWS_REGION"),
            profile: optional_env("AWS_PROFILE"),
            endpoint_url: first_env(&["AWS_ENDPOINT", "SSM_ENDPOINT"]),
        })
    }
}

#[async_trait::async_trait]
impl Configs for StorageConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let storage_backend =
            env_or("PS_STORAGE_BACKEND", DEFAULT_STORAGE_BACKEND).parse::<StorageBackend>()?;

        Ok(StorageConfig {
            storage_backend,
            ssm_storage_config: SsmStorageConfig::load().await?,
        })
    }
}
