//! API Response types
//!
//! Standardized response envelope for the entire framework

use serde::{Deserialize, Serialize};

/// Business code carried by every successful envelope
pub const CODE_SUCCESS: i32 = 200;

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "code": 200,
///     "message": "success",
///     "data": { ... },
///     "success": true
/// }
/// ```
///
/// `code == 200` (or `success == true`) is the sole success discriminator;
/// any other code is a business failure regardless of HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Business code (200 = success)
    pub code: i32,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Redundant success flag kept for wire compatibility
    #[serde(default)]
    pub success: bool,
}

impl<T> Envelope<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "success".to_string(),
            data: Some(data),
            success: true,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: message.into(),
            data: Some(data),
            success: true,
        }
    }

    /// Create an error response
    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            success: false,
        }
    }

    /// Whether this envelope represents a business success
    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS || self.success
    }
}

/// Paginated payload: `{ "list": [...], "total": 42 }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(list: Vec<T>, total: u64) -> Self {
        Self { list, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_discriminator_accepts_code_or_flag() {
        let by_code: Envelope<i32> = Envelope {
            code: 200,
            message: "ok".into(),
            data: Some(1),
            success: false,
        };
        let by_flag: Envelope<i32> = Envelope {
            code: 0,
            message: "ok".into(),
            data: Some(1),
            success: true,
        };
        let failure: Envelope<i32> = Envelope::error(401, "unauthorized");

        assert!(by_code.is_success());
        assert!(by_flag.is_success());
        assert!(!failure.is_success());
    }

    #[test]
    fn envelope_round_trips_through_json() {
        let env = Envelope::ok(vec!["a".to_string(), "b".to_string()]);
        let json = serde_json::to_string(&env).unwrap();
        let back: Envelope<Vec<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, CODE_SUCCESS);
        assert!(back.success);
        assert_eq!(back.data.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn missing_success_field_defaults_to_false() {
        let json = r#"{"code":500,"message":"boom"}"#;
        let env: Envelope<()> = serde_json::from_str(json).unwrap();
        assert!(!env.is_success());
        assert!(env.data.is_none());
    }
}
