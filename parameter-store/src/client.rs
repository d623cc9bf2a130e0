use std::{fmt, sync::Arc};

use tracing::{debug, error, warn};

use crate::{
    configs::{ParameterStoreConfig, ServiceConfig},
    domain::{
        DataType, GetManyResult, Parameter, ParameterDetails, ParameterType, ServiceType,
        TierType, build_key,
    },
    error::ClientException,
    storage::{
        factory::ParameterStoreFactory,
        repository::{ParameterStoreBackend, PutParameterRequest, StoredParameter},
    },
};

/// Optional write settings. Defaults: overwrite, standard tier, text data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateParameterOptions {
    pub overwrite: bool,
    pub tier: TierType,
    pub data_type: DataType,
}

impl Default for CreateParameterOptions {
    fn default() -> Self {
        Self {
            overwrite: true,
            tier: TierType::Standard,
            data_type: DataType::Text,
        }
    }
}

/// Entry point for reading and writing parameters.
///
/// Build it once and share it (it is cheap to clone): every clone reuses the
/// same backend connection.
#[derive(Clone)]
pub struct ParameterStoreService {
    backend: Arc<dyn ParameterStoreBackend>,
    config: ServiceConfig,
}

impl fmt::Debug for ParameterStoreService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStoreService")
            .field("config", &self.config)
            .finish()
    }
}

fn into_details(parameter: StoredParameter) -> ParameterDetails {
    ParameterDetails::from_remote(&parameter.name, parameter.value)
}

impl ParameterStoreService {
    pub fn new(backend: Arc<dyn ParameterStoreBackend>, config: ServiceConfig) -> Self {
        Self { backend, config }
    }

    pub async fn from_config(
        config: Arc<ParameterStoreConfig>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let backend = ParameterStoreFactory::new(Arc::clone(&config)).create().await?;
        Ok(Self::new(backend, config.service_config.clone()))
    }

    pub fn key_for(&self, parameter: &Parameter) -> String {
        build_key(parameter, self.config.env())
    }

    fn ensure_readable(&self, parameter: &Parameter) -> Result<(), ClientException> {
        if self.config.restrict_reads_to_application()
            && parameter.service_name() != ServiceType::Application
        {
            warn!(
                parameter = parameter.parameter_name(),
                service = parameter.service_name().as_str(),
                "Rejected read of a non-application parameter"
            );
            return Err(ClientException::get_parameter_not_allowed(
                parameter.parameter_name(),
            ));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        parameter: &Parameter,
        value: &str,
        parameter_type: ParameterType,
        description: &str,
        options: CreateParameterOptions,
    ) -> Result<(), ClientException> {
        let key = self.key_for(parameter);

        let key_id = parameter_type
            .is_secure()
            .then(|| self.config.kms_key_id().to_string());

        let request = PutParameterRequest {
            name: key.clone(),
            description: description.to_string(),
            value: value.to_string(),
            parameter_type,
            overwrite: options.overwrite,
            tier: options.tier,
            data_type: options.data_type,
            key_id,
        };

        debug!(key = key.as_str(), parameter_type = parameter_type.as_str(), "Creating parameter");

        self.backend.put_parameter(request).await.map_err(|err| {
            error!(key = key.as_str(), %err, "Failed to create parameter");
            if err.is_validation() {
                ClientException::parameter_validation_error(
                    parameter.parameter_name(),
                    Some(err.into()),
                )
            } else {
                ClientException::amazon_client_error(err)
            }
        })
    }

    pub async fn get(&self, parameter: &Parameter) -> Result<ParameterDetails, ClientException> {
        self.ensure_readable(parameter)?;
        let key = self.key_for(parameter);

        debug!(key = key.as_str(), "Getting parameter");

        let stored = self.backend.get_parameter(&key, true).await.map_err(|err| {
            error!(key = key.as_str(), %err, "Failed to get parameter");
            ClientException::amazon_client_error(err)
        })?;

        Ok(into_details(stored))
    }

    /// Reads all parameters in one request. The result follows the store's
    /// order and leaves out parameters the store did not return.
    pub async fn get_many(
        &self,
        parameters: &[Parameter],
    ) -> Result<Vec<ParameterDetails>, ClientException> {
        let result = self.get_many_detailed(parameters).await?;

        if !result.missing.is_empty() {
            warn!(missing = ?result.missing, "Some parameters were not returned by the store");
        }

        Ok(result.parameters)
    }

    pub async fn get_many_detailed(
        &self,
        parameters: &[Parameter],
    ) -> Result<GetManyResult, ClientException> {
        if parameters.is_empty() {
            return Ok(GetManyResult::default());
        }

        for parameter in parameters {
            self.ensure_readable(parameter)?;
        }

        let keys: Vec<String> = parameters.iter().map(|p| self.key_for(p)).collect();

        debug!(keys = ?keys, "Getting parameters");

        let response = self.backend.get_parameters(&keys, true).await.map_err(|err| {
            error!(count = keys.len(), %err, "Failed to get parameters");
            ClientException::amazon_client_error(err)
        })?;

        Ok(GetManyResult {
            parameters: response.parameters.into_iter().map(into_details).collect(),
            missing: response.invalid_names,
        })
    }

    /// Returns the caller's `parameter_name` once the remote delete succeeds.
    pub async fn delete(&self, parameter: &Parameter) -> Result<String, ClientException> {
        let key = self.key_for(parameter);

        debug!(key = key.as_str(), "Deleting parameter");

        self.backend.delete_parameter(&key).await.map_err(|err| {
            error!(key = key.as_str(), %err, "Failed to delete parameter");
            ClientException::amazon_client_error(err)
        })?;

        Ok(parameter.parameter_name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::KeyType, error::ErrorCode, storage::adapters::LocalStore};

    fn service_with(store: LocalStore) -> ParameterStoreService {
        ParameterStoreService::new(Arc::new(store), ServiceConfig::new("dev").unwrap())
    }

    fn forms_data() -> Parameter {
        Parameter::new("forms_data", KeyType::Configuration, "loan_journey").unwrap()
    }

    #[test]
    fn test_key_for_uses_configured_env() {
        let service = service_with(LocalStore::new());
        assert_eq!(
            service.key_for(&forms_data()),
            "/dev/application/configuration/loan_journey/forms_data"
        );
    }

    #[tokio::test]
    async fn test_create_uses_default_options() {
        let store = LocalStore::new();
        let service = service_with(store.clone());

        service
            .create(
                &forms_data(),
                "{}",
                ParameterType::String,
                "loan journey forms",
                CreateParameterOptions::default(),
            )
            .await
            .unwrap();

        let requests = store.put_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.name, "/dev/application/configuration/loan_journey/forms_data");
        assert_eq!(request.description, "loan journey forms");
        assert!(request.overwrite);
        assert_eq!(request.tier, TierType::Standard);
        assert_eq!(request.data_type, DataType::Text);
        assert_eq!(request.key_id, None);
    }

    #[tokio::test]
    async fn test_get_missing_is_amazon_client_error() {
        let service = service_with(LocalStore::new());
        let err = service.get(&forms_data()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::AmazonClientError);
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_get_many_empty_skips_remote_call() {
        let service = service_with(LocalStore::new());
        assert!(service.get_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_restriction() {
        let store = LocalStore::with_parameters([
            ("/dev/lambda/credentials/payments/api_key", "secret"),
            ("/dev/application/configuration/loan_journey/forms_data", "{}"),
        ]);
        let service = ParameterStoreService::new(
            Arc::new(store),
            ServiceConfig::new("dev").unwrap().with_read_restriction(true),
        );

        let lambda_key = Parameter::with_service(
            "api_key",
            KeyType::Credentials,
            "payments",
            ServiceType::Lambda,
        )
        .unwrap();

        let err = service.get(&lambda_key).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::GetParameterNotAllowed);
        assert_eq!(err.status_code(), 403);

        let err = service
            .get_many(&[forms_data(), lambda_key])
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::GetParameterNotAllowed);

        assert_eq!(service.get(&forms_data()).await.unwrap().parameter_value, "{}");
    }
}
