use thiserror::Error;

use crate::domain::{DataType, ParameterType, TierType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameterRequest {
    pub name: String,
    pub description: String,
    pub value: String,
    pub parameter_type: ParameterType,
    pub overwrite: bool,
    pub tier: TierType,
    pub data_type: DataType,
    pub key_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredParameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResponse {
    pub parameters: Vec<StoredParameter>,
    pub invalid_names: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Parameter not found: {0}")]
    NotFound(String),

    #[error("Parameter already exists: {0}")]
    AlreadyExists(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Service error: {0}")]
    Service(String),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Raw operations of the remote key-value store. Names are fully built keys.
#[async_trait::async_trait]
pub trait ParameterStoreBackend: Send + Sync {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<(), StoreError>;

    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<StoredParameter, StoreError>;

    /// Entries come back in whatever order the store chooses.
    async fn get_parameters(
        &self,
        names: &[String],
        with_decryption: bool,
    ) -> Result<BatchResponse, StoreError>;

    async fn delete_parameter(&self, name: &str) -> Result<(), StoreError>;
}
