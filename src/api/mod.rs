//! REST clients for the catalog and the two library services, plus the
//! record shape they all normalize into.

mod catalog;
mod error;
mod library;
mod models;
mod reconcile;
mod services;

pub use catalog::*;
pub use error::*;
pub use library::*;
pub use models::*;
pub use reconcile::*;
pub use services::*;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Decodes a success body, or turns a non-success response into
/// `ApiError::Status` carrying whatever message the service sent.
async fn decode_response<T>(response: reqwest::Response, operation: Operation) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| service_message(&body));
        return Err(ApiError::Status {
            operation,
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(ApiError::transport(operation))
}

fn json_pick_string(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    keys.iter().find_map(|key| match object.get(*key)? {
        serde_json::Value::String(text) if !text.trim().is_empty() => {
            Some(text.trim().to_string())
        }
        _ => None,
    })
}

/// TMDB sends `{status_message}`, the library services send `{message}` or a
/// list of validation failures carrying `errorMessage`.
fn service_message(body: &serde_json::Value) -> Option<String> {
    const KEYS: &[&str] = &["message", "status_message", "errorMessage"];
    match body {
        serde_json::Value::Array(entries) => {
            let messages: Vec<String> = entries
                .iter()
                .filter_map(|entry| json_pick_string(entry, KEYS))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        other => json_pick_string(other, KEYS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn service_message_reads_each_error_shape() {
        assert_eq!(
            service_message(&json!({"status_message": "Invalid API key"})),
            Some("Invalid API key".to_string())
        );
        assert_eq!(
            service_message(&json!([
                {"propertyName": "TmdbId", "errorMessage": "This movie has already been added"},
                {"propertyName": "Path", "errorMessage": "Path is required"}
            ])),
            Some("This movie has already been added; Path is required".to_string())
        );
        assert_eq!(service_message(&json!({"message": "  "})), None);
        assert_eq!(service_message(&json!("plain")), None);
    }
}
