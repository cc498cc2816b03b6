use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use uuid::Uuid;

use crate::error::AppError;

/// Length of an id in hexadecimal characters (12 bytes).
pub const OBJECT_ID_LEN: usize = 24;

lazy_static! {
    static ref HEX_REGEX: Regex = Regex::new(r"^[0-9a-fA-F]+$").unwrap();
}

/// A 24-character lowercase hexadecimal identifier for users and todos.
///
/// Freshly generated ids start with four bytes of big-endian Unix seconds, so ids
/// minted later sort after earlier ones; the remaining eight bytes are random.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let random = Uuid::new_v4();

        let mut hex = String::with_capacity(OBJECT_ID_LEN);
        for byte in seconds.to_be_bytes().iter().chain(&random.as_bytes()[..8]) {
            // Writing into a String cannot fail.
            let _ = write!(hex, "{:02x}", byte);
        }
        ObjectId(hex)
    }

    /// Parses a client-supplied id, rejecting anything but exactly 24 hex characters.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if !HEX_REGEX.is_match(raw) {
            return Err(AppError::ValidationError(
                "Invalid ObjectId format. It should be a hexadecimal string.".into(),
            ));
        }
        if raw.len() != OBJECT_ID_LEN {
            return Err(AppError::ValidationError(
                "Invalid ObjectId format. ObjectId must be exactly 24 characters long.".into(),
            ));
        }
        Ok(ObjectId(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<ObjectId, AppError>) -> String {
        match result {
            Err(AppError::ValidationError(msg)) => msg,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = ObjectId::new();
        let b = ObjectId::new();

        assert_eq!(a.as_str().len(), OBJECT_ID_LEN);
        assert_ne!(a, b);
        assert_eq!(ObjectId::parse(a.as_str()).unwrap(), a);
    }

    #[test]
    fn test_parse_normalises_case() {
        let id = ObjectId::parse("65A1B2C3D4E5F60718293A4B").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert_eq!(
            message(ObjectId::parse("invalid-id")),
            "Invalid ObjectId format. It should be a hexadecimal string."
        );
        assert_eq!(
            message(ObjectId::parse("")),
            "Invalid ObjectId format. It should be a hexadecimal string."
        );
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let short = "65a1b2c3d4e5f60718293a4"; // 23 characters
        let msg = message(ObjectId::parse(short));
        assert!(msg.starts_with("Invalid ObjectId format."), "{}", msg);
        assert!(msg.contains("24 characters"));

        let long = "65a1b2c3d4e5f60718293a4bc";
        assert!(ObjectId::parse(long).is_err());
    }
}
