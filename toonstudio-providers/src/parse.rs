use crate::runtime::HttpResponse;
use serde::de::DeserializeOwned;
use toonstudio_core::api::ErrorBody;
use toonstudio_core::error::GatewayError;

/// Best available message for a non-2xx response: the body's `detail` string,
/// else `HTTP error, status <code>`.
pub fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| GatewayError::http_fallback_message(status))
}

pub fn decode_response<T: DeserializeOwned>(resp: &HttpResponse) -> Result<T, GatewayError> {
    if !resp.is_success() {
        return Err(GatewayError::Http {
            status: resp.status,
            message: error_message(resp.status, &resp.body),
        });
    }

    serde_json::from_slice(&resp.body).map_err(|e| GatewayError::Decode(e.to_string()))
}
