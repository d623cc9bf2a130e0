use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::error::ClientException;

pub mod key;

pub use key::{build_key, last_segment};

fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    #[serde(rename = "String")]
    String,
    #[serde(rename = "StringList")]
    StringList,
    #[serde(rename = "SecureString")]
    SecureString,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::StringList => "StringList",
            Self::SecureString => "SecureString",
        }
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, Self::SecureString)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ParameterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "string" => Ok(Self::String),
            "stringlist" => Ok(Self::StringList),
            "securestring" => Ok(Self::SecureString),
            _ => Err(format!("Invalid parameter type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TierType {
    #[default]
    #[serde(rename = "Standard")]
    Standard,
    #[serde(rename = "Advanced")]
    Advanced,
}

impl TierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for TierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TierType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "standard" => Ok(Self::Standard),
            "advanced" => Ok(Self::Advanced),
            _ => Err(format!("Invalid tier type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataType {
    #[default]
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "aws:ec2:image")]
    AmazonMachineId,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::AmazonMachineId => "aws:ec2:image",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "text" => Ok(Self::Text),
            "aws:ec2:image" | "amazonmachineid" => Ok(Self::AmazonMachineId),
            _ => Err(format!("Invalid data type: {}", s)),
        }
    }
}

/// Service segment of a parameter key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Shared by every service
    #[default]
    Application,
    Lambda,
    Ses,
    S3,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Lambda => "lambda",
            Self::Ses => "ses",
            Self::S3 => "s3",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "application" => Ok(Self::Application),
            "lambda" => Ok(Self::Lambda),
            "ses" | "amazonses" => Ok(Self::Ses),
            "s3" | "amazons3" => Ok(Self::S3),
            _ => Err(format!("Invalid service type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Configuration,
    Credentials,
    Constants,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Credentials => "credentials",
            Self::Constants => "constants",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "configuration" => Ok(Self::Configuration),
            "credentials" => Ok(Self::Credentials),
            "constants" => Ok(Self::Constants),
            _ => Err(format!("Invalid key type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ParameterFields {
    parameter_name: String,
    key_type: KeyType,
    subtype: String,
    #[serde(default)]
    service_name: ServiceType,
}

/// Identifies a configuration or secret entry by name, type and scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ParameterFields")]
pub struct Parameter {
    parameter_name: String,
    key_type: KeyType,
    subtype: String,
    service_name: ServiceType,
}

impl Parameter {
    pub fn new(
        parameter_name: impl Into<String>,
        key_type: KeyType,
        subtype: impl Into<String>,
    ) -> Result<Self, ClientException> {
        Self::with_service(parameter_name, key_type, subtype, ServiceType::default())
    }

    pub fn with_service(
        parameter_name: impl Into<String>,
        key_type: KeyType,
        subtype: impl Into<String>,
        service_name: ServiceType,
    ) -> Result<Self, ClientException> {
        let parameter_name = parameter_name.into();
        let subtype = subtype.into();

        if parameter_name.trim().is_empty() || subtype.trim().is_empty() {
            return Err(ClientException::parameter_validation_error(
                &parameter_name,
                Some("parameter_name and subtype must be non-empty".into()),
            ));
        }

        Ok(Self {
            parameter_name,
            key_type,
            subtype,
            service_name,
        })
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn service_name(&self) -> ServiceType {
        self.service_name
    }
}

impl TryFrom<ParameterFields> for Parameter {
    type Error = ClientException;

    fn try_from(fields: ParameterFields) -> Result<Self, Self::Error> {
        Self::with_service(
            fields.parameter_name,
            fields.key_type,
            fields.subtype,
            fields.service_name,
        )
    }
}

/// A value read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDetails {
    pub parameter_name: String,
    pub parameter_value: String,
}

impl ParameterDetails {
    /// `parameter_name` is taken from the last segment of the remote key.
    pub fn from_remote(key: &str, value: impl Into<String>) -> Self {
        Self {
            parameter_name: last_segment(key).to_string(),
            parameter_value: value.into(),
        }
    }
}

/// Outcome of a batch read, with the keys the store did not return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetManyResult {
    pub parameters: Vec<ParameterDetails>,
    pub missing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parameter_defaults_to_application() {
        let parameter = Parameter::new("forms_data", KeyType::Configuration, "loan_journey").unwrap();
        assert_eq!(parameter.service_name(), ServiceType::Application);
        assert_eq!(parameter.parameter_name(), "forms_data");
    }

    #[test]
    fn test_parameter_rejects_empty_fields() {
        let err = Parameter::new("", KeyType::Credentials, "database").unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ParameterValidationError);

        let err = Parameter::new("host", KeyType::Credentials, "  ").unwrap_err();
        assert!(err.error_message().contains("host"));
    }

    #[test]
    fn test_parameter_deserialize_validates() {
        let parameter: Parameter = serde_json::from_str(
            r#"{"parameter_name":"host","key_type":"credentials","subtype":"database"}"#,
        )
        .unwrap();
        assert_eq!(parameter.key_type(), KeyType::Credentials);
        assert_eq!(parameter.service_name(), ServiceType::Application);

        let result: Result<Parameter, _> = serde_json::from_str(
            r#"{"parameter_name":"","key_type":"credentials","subtype":"database"}"#,
        );
        assert!(result.is_err());

        let result: Result<Parameter, _> = serde_json::from_str(
            r#"{"parameter_name":"host","key_type":"secrets","subtype":"database"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_enum_wire_strings() {
        assert_eq!(ParameterType::StringList.to_string(), "StringList");
        assert_eq!(TierType::Advanced.as_str(), "Advanced");
        assert_eq!(DataType::AmazonMachineId.as_str(), "aws:ec2:image");
        assert_eq!(ServiceType::Ses.as_str(), "ses");
        assert_eq!(
            serde_json::to_string(&ParameterType::SecureString).unwrap(),
            "\"SecureString\""
        );
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("secure_string".parse::<ParameterType>().unwrap(), ParameterType::SecureString);
        assert_eq!("SecureString".parse::<ParameterType>().unwrap(), ParameterType::SecureString);
        assert_eq!("aws:ec2:image".parse::<DataType>().unwrap(), DataType::AmazonMachineId);
        assert_eq!("AMAZON_S3".parse::<ServiceType>().unwrap(), ServiceType::S3);
        assert_eq!("CONSTANTS".parse::<KeyType>().unwrap(), KeyType::Constants);
        assert!("Intelligent".parse::<TierType>().is_err());
    }

    #[test]
    fn test_details_use_last_segment() {
        let details = ParameterDetails::from_remote("/dev/application/credentials/database/host", "db.local");
        assert_eq!(details.parameter_name, "host");
        assert_eq!(details.parameter_value, "db.local");
    }
}
