use aws_config::BehaviorVersion;
use aws_sdk_ssm::{
    Client,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{ParameterTier, ParameterType as SsmParameterType},
};
use aws_types::region::Region;
use tracing::debug;

use crate::{
    configs::SsmStorageConfig,
    domain::{ParameterType, TierType},
    storage::repository::{
        BatchResponse, ParameterStoreBackend, PutParameterRequest, StoreError, StoredParameter,
    },
};

/// Service error codes SSM returns when it rejects the request itself
const VALIDATION_ERROR_CODES: [&str; 7] = [
    "ValidationException",
    "ParameterPatternMismatchException",
    "UnsupportedParameterType",
    "HierarchyTypeMismatchException",
    "HierarchyLevelLimitExceededException",
    "InvalidAllowedPatternException",
    "InvalidKeyId",
];

#[derive(Clone)]
pub struct SsmStore {
    client: Client,
}

impl SsmStore {
    pub async fn new(config: SsmStorageConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }

        let shared_config = loader.load().await;

        Self::with_client(Client::new(&shared_config))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl std::fmt::Debug for SsmStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsmStore")
            .field("region", &self.client.config().region())
            .finish()
    }
}

fn ssm_parameter_type(parameter_type: ParameterType) -> SsmParameterType {
    match parameter_type {
        ParameterType::String => SsmParameterType::String,
        ParameterType::StringList => SsmParameterType::StringList,
        ParameterType::SecureString => SsmParameterType::SecureString,
    }
}

fn ssm_tier(tier: TierType) -> ParameterTier {
    match tier {
        TierType::Standard => ParameterTier::Standard,
        TierType::Advanced => ParameterTier::Advanced,
    }
}

fn classify_error<E>(err: SdkError<E>, action: &str, name: &str) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let message = format!("Failed to {} '{}': {}", action, name, DisplayErrorContext(&err));

    match &err {
        SdkError::ConstructionFailure(_) => StoreError::Validation(message),
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            StoreError::Connection(message)
        }
        SdkError::ServiceError(service_err) => match service_err.err().code() {
            Some(code) if VALIDATION_ERROR_CODES.contains(&code) => StoreError::Validation(message),
            Some("ParameterNotFound") => StoreError::NotFound(message),
            Some("ParameterAlreadyExists") => StoreError::AlreadyExists(message),
            _ => StoreError::Service(message),
        },
        _ => StoreError::Service(message),
    }
}

fn into_stored(parameter: aws_sdk_ssm::types::Parameter) -> Result<StoredParameter, StoreError> {
    let name = parameter
        .name
        .ok_or_else(|| StoreError::Service("Parameter returned without a name".to_string()))?;
    let value = parameter
        .value
        .ok_or_else(|| StoreError::Service(format!("Parameter '{}' has no value", name)))?;

    Ok(StoredParameter { name, value })
}

#[async_trait::async_trait]
impl ParameterStoreBackend for SsmStore {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<(), StoreError> {
        debug!(
            name = request.name.as_str(),
            parameter_type = request.parameter_type.as_str(),
            "Putting parameter into SSM"
        );

        self.client
            .put_parameter()
            .name(&request.name)
            .description(&request.description)
            .value(&request.value)
            .r#type(ssm_parameter_type(request.parameter_type))
            .overwrite(request.overwrite)
            .tier(ssm_tier(request.tier))
            .data_type(request.data_type.as_str())
            .set_key_id(request.key_id.clone())
            .send()
            .await
            .map_err(|err| classify_error(err, "put parameter", &request.name))?;

        Ok(())
    }

    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<StoredParameter, StoreError> {
        debug!(name, "Getting parameter from SSM");

        let response = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(with_decryption)
            .send()
            .await
            .map_err(|err| classify_error(err, "get parameter", name))?;

        let parameter = response
            .parameter
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        into_stored(parameter)
    }

    async fn get_parameters(
        &self,
        names: &[String],
        with_decryption: bool,
    ) -> Result<BatchResponse, StoreError> {
        debug!(count = names.len(), "Getting parameters from SSM");

        let response = self
            .client
            .get_parameters()
            .set_names(Some(names.to_vec()))
            .with_decryption(with_decryption)
            .send()
            .await
            .map_err(|err| classify_error(err, "get parameters", &names.join(",")))?;

        let parameters = response
            .parameters
            .unwrap_or_default()
            .into_iter()
            .map(into_stored)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BatchResponse {
            parameters,
            invalid_names: response.invalid_parameters.unwrap_or_default(),
        })
    }

    async fn delete_parameter(&self, name: &str) -> Result<(), StoreError> {
        debug!(name, "Deleting parameter from SSM");

        self.client
            .delete_parameter()
            .name(name)
            .send()
            .await
            .map_err(|err| classify_error(err, "delete parameter", name))?;

        Ok(())
    }
}
