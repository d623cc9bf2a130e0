use super::{
    Configs,
    loaders::environment::{bool_env, env_or, first_env},
};

/// AWS managed key used for SecureString writes when none is configured
pub const DEFAULT_KMS_KEY_ID: &str = "alias/aws/ssm";

const ENV_VARIABLES: [&str; 2] = ["env", "APP_ENV"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    env: String,
    kms_key_id: String,
    restrict_reads_to_application: bool,
}

impl ServiceConfig {
    pub fn new(env: impl Into<String>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let env = env.into();
        if env.trim().is_empty() {
            return Err("Environment name must not be empty".into());
        }

        Ok(Self {
            env,
            kms_key_id: DEFAULT_KMS_KEY_ID.to_string(),
            restrict_reads_to_application: false,
        })
    }

    pub fn with_kms_key_id(mut self, kms_key_id: impl Into<String>) -> Self {
        self.kms_key_id = kms_key_id.into();
        self
    }

    pub fn with_read_restriction(mut self, restrict_reads_to_application: bool) -> Self {
        self.restrict_reads_to_application = restrict_reads_to_application;
        self
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn kms_key_id(&self) -> &str {
        &self.kms_key_id
    }

    pub fn restrict_reads_to_application(&self) -> bool {
        self.restrict_reads_to_application
    }
}

#[async_trait::async_trait]
impl Configs for ServiceConfig {
    async fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let env = first_env(&ENV_VARIABLES).ok_or_else(|| {
            format!(
                "Missing required environment variable: one of {}",
                ENV_VARIABLES.join(", ")
            )
        })?;

        Ok(ServiceConfig::new(env)?
            .with_kms_key_id(env_or("PS_KMS_KEY_ID", DEFAULT_KMS_KEY_ID))
            .with_read_restriction(bool_env("PS_RESTRICT_READS_TO_APPLICATION", false)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            for name in ENV_VARIABLES {
                std::env::remove_var(name);
            }
            std::env::remove_var("PS_KMS_KEY_ID");
            std::env::remove_var("PS_RESTRICT_READS_TO_APPLICATION");
        }
    }

    #[test]
    fn test_new_rejects_empty_env() {
        assert!(ServiceConfig::new("").is_err());
        assert!(ServiceConfig::new("   ").is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_load_fails_without_env() {
        clear_env();
        let result = ServiceConfig::load().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("env"));
    }

    #[tokio::test]
    #[serial]
    async fn test_load_with_defaults() {
        clear_env();
        unsafe {
            std::env::set_var("env", "dev");
        }

        let config = ServiceConfig::load().await.unwrap();
        assert_eq!(config.env(), "dev");
        assert_eq!(config.kms_key_id(), DEFAULT_KMS_KEY_ID);
        assert!(!config.restrict_reads_to_application());

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn test_load_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("APP_ENV", "staging");
            std::env::set_var("PS_KMS_KEY_ID", "alias/app-secrets");
            std::env::set_var("PS_RESTRICT_READS_TO_APPLICATION", "true");
        }

        let config = ServiceConfig::load().await.unwrap();
        assert_eq!(config.env(), "staging");
        assert_eq!(config.kms_key_id(), "alias/app-secrets");
        assert!(config.restrict_reads_to_application());

        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn test_load_rejects_bad_flag() {
        clear_env();
        unsafe {
            std::env::set_var("env", "dev");
            std::env::set_var("PS_RESTRICT_READS_TO_APPLICATION", "maybe");
        }

        assert!(ServiceConfig::load().await.is_err());

        clear_env();
    }
}
