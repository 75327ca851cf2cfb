//! Text -> records
//!
//! Parsing is lenient: missing markers or fields degrade to empty results.
//! Keys lacking a type, value or title are dropped.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{
    locate_dss_block, locate_sip_block, sip_slot, DssField, SipField, DEFAULT_ICON, MAX_DSS_KEYS,
};
use crate::model::{DssKey, SipAccount};

// =============================================================================
// PATTERNS
// =============================================================================

/// `Fkey<i> <Field><padding>:<value>`
static DSS_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Fkey([1-9][0-9]*) (Type|Value|Title|ICON)\s*:(.*)").unwrap()
});

/// `SIP1 <Label><padding>:<value>`
static SIP_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<String> = SipField::ALL
        .iter()
        .map(|f| regex::escape(f.label()))
        .collect();
    Regex::new(&format!(r"SIP1 ({})\s*:(.*)", labels.join("|"))).unwrap()
});

// =============================================================================
// READ PATH
// =============================================================================

/// Records extracted from one configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    pub dss_keys: Vec<DssKey>,
    pub sip_account: SipAccount,
}

pub fn parse_config(text: &str) -> ParsedConfig {
    let parsed = ParsedConfig {
        dss_keys: extract_dss_keys(text),
        sip_account: extract_sip_account(text),
    };
    debug!(
        dss_keys = parsed.dss_keys.len(),
        phone_number = %parsed.sip_account.phone_number,
        "parsed phone config"
    );
    parsed
}

/// Extract the DSS key table, in ascending slot order.
///
/// Returns an empty list when the document has no DSS block.
pub fn extract_dss_keys(text: &str) -> Vec<DssKey> {
    let Some((_, body_start, body_end)) = locate_dss_block(text) else {
        return Vec::new();
    };
    let block = &text[body_start..body_end];

    // First acceptable line per (slot, field) wins.
    let mut fields: HashMap<(u32, DssField), String> = HashMap::new();
    for caps in DSS_FIELD_RE.captures_iter(block) {
        let Ok(index) = caps[1].parse::<u32>() else {
            continue;
        };
        if index > MAX_DSS_KEYS {
            continue;
        }
        let Some(field) = DssField::from_name(&caps[2]) else {
            continue;
        };
        if fields.contains_key(&(index, field)) {
            continue;
        }
        if let Some(value) = accept_field(field, &caps[3]) {
            fields.insert((index, field), value);
        }
    }

    (1..=MAX_DSS_KEYS)
        .filter_map(|index| {
            let key_type = fields.get(&(index, DssField::Type))?.parse::<u32>().ok()?;
            let value = fields.get(&(index, DssField::Value))?.clone();
            let label = fields.get(&(index, DssField::Title))?.clone();
            let icon = fields
                .get(&(index, DssField::Icon))
                .cloned()
                .unwrap_or_else(|| DEFAULT_ICON.to_string());
            Some(DssKey {
                index,
                key_type,
                value,
                label,
                icon,
            })
        })
        .collect()
}

/// Normalise the raw text after the colon, or `None` when the line does not
/// count as a value for this field.
///
/// A type must start directly with digits (only the digit run is kept).
/// Other fields need at least one character after the colon.
fn accept_field(field: DssField, raw: &str) -> Option<String> {
    match field {
        DssField::Type => {
            let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
            (!digits.is_empty()).then_some(digits)
        }
        DssField::Value | DssField::Title | DssField::Icon => {
            (!raw.is_empty()).then(|| raw.trim().to_string())
        }
    }
}

/// Extract the `SIP1` account. Labels that are not found stay empty.
pub fn extract_sip_account(text: &str) -> SipAccount {
    let block = locate_sip_block(text)
        .map(|(_, body_start, body_end)| &text[body_start..body_end])
        .unwrap_or("");

    let mut sip = SipAccount::default();
    let mut seen = [false; SipField::ALL.len()];
    for caps in SIP_FIELD_RE.captures_iter(block) {
        let Some(field) = SipField::from_label(&caps[1]) else {
            continue;
        };
        let slot = field as usize;
        if seen[slot] {
            continue;
        }
        seen[slot] = true;
        *sip_slot(&mut sip, field) = caps[2].trim().to_string();
    }
    sip
}
