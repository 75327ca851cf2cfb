//! Structured records extracted from a phone configuration file
//!
//! These are the shapes exchanged with the browser editor: they are
//! derived fresh from text on every read and submitted back as a full
//! replacement on every write.

use serde::{Deserialize, Deserializer, Serialize};

use crate::phone_cfg::DEFAULT_ICON;

// ============================================================================
// DSS keys
// ============================================================================

/// One programmable function key slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DssKey {
    /// Slot number on the device (1..=32)
    pub index: u32,
    /// Key function code
    #[serde(deserialize_with = "number_or_string")]
    pub key_type: u32,
    /// Key payload, e.g. an extension or feature code
    pub value: String,
    /// Display label
    pub label: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl DssKey {
    pub fn new(
        index: u32,
        key_type: u32,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            index,
            key_type,
            value: value.into(),
            label: label.into(),
            icon: default_icon(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

/// The editor form posts edited numbers back as strings ("3"), so the key
/// type is accepted either way.
fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("key_type must be a non-negative integer, got {s:?}"))
        }),
    }
}

// ============================================================================
// SIP account
// ============================================================================

/// The single `SIP1` registration identity. Every field is carried as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipAccount {
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    pub register_addr: String,
    pub register_port: String,
    pub register_user: String,
    pub register_password: String,
    pub register_ttl: String,
    pub enable_reg: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Request/Response documents
// ============================================================================

/// Full view of one configuration file.
///
/// Returned by `GET /api/config/:filename` and accepted by
/// `POST /api/config/:filename`, where `raw_config` is the text the caller
/// originally loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub dss_keys: Vec<DssKey>,
    pub sip_account: SipAccount,
    pub raw_config: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub message: String,
}
