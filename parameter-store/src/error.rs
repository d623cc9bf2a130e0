use std::{error::Error, fmt};

pub const DEFAULT_STATUS_CODE: u16 = 500;
pub const FORBIDDEN_STATUS_CODE: u16 = 403;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Closed set of error codes returned by the parameter store client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    AmazonClientError = 1000,
    ParameterValidationError = 1001,
    GetParameterNotAllowed = 1002,
}

impl ErrorCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AmazonClientError => "AMAZON_CLIENT_ERROR",
            Self::ParameterValidationError => "PARAMETER_VALIDATION_ERROR",
            Self::GetParameterNotAllowed => "GET_PARAMETER_NOT_ALLOWED",
        }
    }

    /// Message template. `{}` stands for the parameter name.
    pub fn message_template(self) -> &'static str {
        match self {
            Self::AmazonClientError => {
                "An error occurred while interacting with AWS, Please try again later. "
            }
            Self::ParameterValidationError => {
                "Parameter: {}, is not a valid parameter to store at ssm parameter store."
            }
            Self::GetParameterNotAllowed => {
                "Parameter: {}, is not allowed to be fetched since it is not an application parameter."
            }
        }
    }

    pub fn message(self, parameter_name: &str) -> String {
        self.message_template().replacen("{}", parameter_name, 1)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// The single error type surfaced by [`crate::client::ParameterStoreService`].
///
/// Carries the error code, the rendered message, the lower-level error that
/// caused it (exposed through [`Error::source`]) and an HTTP-style status code.
#[derive(Debug)]
pub struct ClientException {
    error_code: ErrorCode,
    error_message: String,
    error: Option<BoxError>,
    status_code: u16,
}

impl ClientException {
    pub fn new(error_code: ErrorCode, error_message: impl Into<String>, error: Option<BoxError>) -> Self {
        Self {
            error_code,
            error_message: error_message.into(),
            error,
            status_code: DEFAULT_STATUS_CODE,
        }
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn amazon_client_error(error: impl Into<BoxError>) -> Self {
        let code = ErrorCode::AmazonClientError;
        Self::new(code, code.message_template(), Some(error.into()))
    }

    pub fn parameter_validation_error(parameter_name: &str, error: Option<BoxError>) -> Self {
        let code = ErrorCode::ParameterValidationError;
        Self::new(code, code.message(parameter_name), error)
    }

    pub fn get_parameter_not_allowed(parameter_name: &str) -> Self {
        let code = ErrorCode::GetParameterNotAllowed;
        Self::new(code, code.message(parameter_name), None).with_status_code(FORBIDDEN_STATUS_CODE)
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl fmt::Display for ClientException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code, self.error_message)?;
        if let Some(error) = &self.error {
            write!(f, ": {}", error)?;
        }
        Ok(())
    }
}

impl Error for ClientException {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.error.as_ref().map(|e| &**e as &(dyn Error + 'static))
    }
}
