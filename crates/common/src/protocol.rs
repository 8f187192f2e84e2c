//! Report types printed by the `aes256` tool.
//!
//! These types are serialised as JSON on stdout so shell pipelines can pick
//! individual fields out with `jq`.

use serde::{Deserialize, Serialize};

use crate::role::Role;

// ---------------------------------------------------------------------------
// Key material
// ---------------------------------------------------------------------------

/// Output of `aes256 gen` and `aes256 step`.
///
/// For keys the `hex` field is omitted; key bytes are only ever written to a
/// file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialReport {
    pub role: Role,
    /// Width of the buffer in bytes.
    pub len: usize,
    /// Lowercase hex of the value, absent for keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// File the value was written to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// AEAD
// ---------------------------------------------------------------------------

/// Output of `aes256 split`: the two halves of a GCM ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    /// Ciphertext proper, lowercase hex.
    pub ciphertext: String,
    /// Trailing authentication tag, lowercase hex.
    pub tag: String,
}

// ---------------------------------------------------------------------------
// Error report
// ---------------------------------------------------------------------------

/// Error report written to stderr when a command fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Short machine-readable error code (e.g. `"auth_failed"`).
    pub code: String,
    /// Human-readable description. Never contains key material.
    pub message: String,
}

impl ErrorReport {
    /// Construct an [`ErrorReport`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_report_omits_hex() {
        let r = MaterialReport {
            role: Role::Key,
            len: 32,
            hex: None,
            path: Some("k.bin".into()),
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("hex"));
        assert!(json.contains("\"role\":\"key\""));
    }

    #[test]
    fn split_report_serde() {
        let r = SplitReport {
            ciphertext: "00ff".into(),
            tag: "aa".repeat(16),
        };
        let json = serde_json::to_string(&r).unwrap();
        let decoded: SplitReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.tag.len(), 32);
    }

    #[test]
    fn error_report_new() {
        let e = ErrorReport::new("auth_failed", "message authentication failed");
        assert_eq!(e.code, "auth_failed");
        assert!(e.message.contains("authentication"));
    }
}
