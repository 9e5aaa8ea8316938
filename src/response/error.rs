use thiserror::Error;

const BODY_PREVIEW_LIMIT: usize = 200;

/// Errors raised while decoding a response body.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The body decoded, but it represents a remote-side failure. Carries
    /// the provider's own message and numeric code (0 when absent).
    #[error("provider error {code}: {message}")]
    Provider { message: String, code: i64 },

    /// The body could not be decoded in any accepted format. The full raw
    /// body is retained for diagnostics; display truncates it.
    #[error("response could not be decoded ({}): {}", .detail, preview(.body))]
    Malformed { detail: String, body: String },
}

fn preview(body: &str) -> String {
    if body.len() > BODY_PREVIEW_LIMIT {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i <= BODY_PREVIEW_LIMIT)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_truncates_long_bodies() {
        let err = ResponseError::Malformed {
            detail: "bad".to_string(),
            body: "x".repeat(500),
        };
        let shown = err.to_string();
        assert!(shown.len() < 300);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn provider_error_carries_message_and_code() {
        let err = ResponseError::Provider {
            message: "city not found".to_string(),
            code: 404,
        };
        assert_eq!(err.to_string(), "provider error 404: city not found");
    }
}
