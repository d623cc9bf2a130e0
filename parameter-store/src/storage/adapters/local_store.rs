use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::domain::ParameterType;
use crate::storage::repository::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LocalEntry {
    value: String,
    parameter_type: ParameterType,
    key_id: Option<String>,
}

/// In-process store that follows the SSM rules the client depends on:
/// name pattern, overwrite flag, not-found and batch invalid names.
#[derive(Clone, Default)]
pub struct LocalStore {
    parameters: Arc<RwLock<HashMap<String, LocalEntry>>>,
    put_requests: Arc<RwLock<Vec<PutParameterRequest>>>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Service("Local store lock poisoned".to_string())
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = parameters
            .into_iter()
            .map(|(name, value)| {
                (
                    name.into(),
                    LocalEntry {
                        value: value.into(),
                        parameter_type: ParameterType::String,
                        key_id: None,
                    },
                )
            })
            .collect();

        Self {
            parameters: Arc::new(RwLock::new(entries)),
            put_requests: Arc::default(),
        }
    }

    /// Every write request received so far, in arrival order.
    pub fn put_requests(&self) -> Vec<PutParameterRequest> {
        self.put_requests
            .read()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parameters
            .read()
            .map(|parameters| parameters.contains_key(name))
            .unwrap_or(false)
    }

    /// Type and encryption key the named parameter was last written with.
    pub fn stored_type(&self, name: &str) -> Option<(ParameterType, Option<String>)> {
        self.parameters.read().ok().and_then(|parameters| {
            parameters
                .get(name)
                .map(|entry| (entry.parameter_type, entry.key_id.clone()))
        })
    }

    pub fn len(&self) -> usize {
        self.parameters.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn validate_name(name: &str) -> Result<(), StoreError> {
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/'));

        if !name.starts_with('/') || !valid_chars {
            return Err(StoreError::Validation(format!(
                "Parameter name '{}' does not match the allowed pattern",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ParameterStoreBackend for LocalStore {
    async fn put_parameter(&self, request: PutParameterRequest) -> Result<(), StoreError> {
        debug!(name = request.name.as_str(), "Putting parameter into local store");

        self.put_requests.write().map_err(poisoned)?.push(request.clone());

        Self::validate_name(&request.name)?;
        if request.value.is_empty() {
            return Err(StoreError::Validation(format!(
                "Parameter '{}' has an empty value",
                request.name
            )));
        }

        let mut parameters = self.parameters.write().map_err(poisoned)?;
        if !request.overwrite && parameters.contains_key(&request.name) {
            return Err(StoreError::AlreadyExists(request.name));
        }

        parameters.insert(
            request.name,
            LocalEntry {
                value: request.value,
                parameter_type: request.parameter_type,
                key_id: request.key_id,
            },
        );
        Ok(())
    }

    async fn get_parameter(
        &self,
        name: &str,
        _with_decryption: bool,
    ) -> Result<StoredParameter, StoreError> {
        let parameters = self.parameters.read().map_err(poisoned)?;
        parameters
            .get(name)
            .map(|entry| StoredParameter {
                name: name.to_string(),
                value: entry.value.clone(),
            })
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn get_parameters(
        &self,
        names: &[String],
        _with_decryption: bool,
    ) -> Result<BatchResponse, StoreError> {
        let parameters = self.parameters.read().map_err(poisoned)?;
        let mut response = BatchResponse::default();

        for name in names {
            let already_listed = response.parameters.iter().any(|p| &p.name == name)
                || response.invalid_names.contains(name);
            if already_listed {
                continue;
            }

            match parameters.get(name) {
                Some(entry) => response.parameters.push(StoredParameter {
                    name: name.clone(),
                    value: entry.value.clone(),
                }),
                None => response.invalid_names.push(name.clone()),
            }
        }

        Ok(response)
    }

    async fn delete_parameter(&self, name: &str) -> Result<(), StoreError> {
        let mut parameters = self.parameters.write().map_err(poisoned)?;
        parameters
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}
