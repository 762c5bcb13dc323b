//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use timeweave_domain::TimeweaveError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TimeweaveError);

impl From<InfraError> for TimeweaveError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TimeweaveError> for InfraError {
    fn from(value: TimeweaveError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if err.is_decode() {
            return InfraError(TimeweaveError::InvalidInput(format!(
                "failed to decode response body: {err}"
            )));
        } else {
            format!("http error: {err}")
        };
        InfraError(TimeweaveError::Network(message))
    }
}
