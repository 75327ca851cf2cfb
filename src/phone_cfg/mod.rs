//! Fanvil configuration text format
//!
//! The phone stores its settings as a line-oriented text file made of
//! marker-delimited modules. Two of them are understood here:
//!
//! ```text
//! <DSSKEY CONFIG MODULE>
//! --Dsskey Config1--
//! Fkey1 Type    :1
//! Fkey1 Value   :100
//! Fkey1 Title   :One
//! Fkey1 ICON    :Red
//!                                  <- blank line ends the block
//! <SIP CONFIG MODULE>
//! SIP1 Phone Number     :100
//! ...
//! SIP1 Enable Reg       :1
//! <<END OF FILE>>
//! ```
//!
//! Everything else in the file is opaque and must survive a write byte for
//! byte. Reading degrades to empty results on foreign text; nothing in this
//! module returns an error.
//!
//! - [`parser`]: text -> records
//! - [`formatter`]: records -> canonical block text
//! - [`splice`]: replace (or add) blocks inside an existing document

pub mod formatter;
pub mod parser;
pub mod splice;

pub use formatter::{format_dss_block, format_sip_block};
pub use parser::{extract_dss_keys, extract_sip_account, parse_config, ParsedConfig};
pub use splice::{render_config, splice_config};

/// Start of the DSS key module
pub const DSS_HEADER: &str = "<DSSKEY CONFIG MODULE>";
/// Line that must directly follow [`DSS_HEADER`]
pub const DSS_SUBHEADER: &str = "--Dsskey Config1--";
/// A DSS block ends at the first blank line
pub const BLOCK_TERMINATOR: &str = "\n\n";

/// Start of the SIP module
pub const SIP_HEADER: &str = "<SIP CONFIG MODULE>";
/// Terminal marker of the file, closes the SIP module
pub const END_OF_FILE: &str = "<<END OF FILE>>";

/// Number of programmable key slots on the device
pub const MAX_DSS_KEYS: u32 = 32;
pub const DEFAULT_ICON: &str = "Green";

/// Column width of DSS field names (`Fkey1 Type    :`)
pub(crate) const DSS_FIELD_WIDTH: usize = 8;
/// Column width of SIP labels; `Register Password` fills it exactly
pub(crate) const SIP_LABEL_WIDTH: usize = 17;

/// Per-key fields, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum DssField {
    Type,
    Value,
    Title,
    Icon,
}

impl DssField {
    pub(crate) const ALL: [DssField; 4] = [
        DssField::Type,
        DssField::Value,
        DssField::Title,
        DssField::Icon,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            DssField::Type => "Type",
            DssField::Value => "Value",
            DssField::Title => "Title",
            DssField::Icon => "ICON",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// `SIP1` labels, in the order they are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SipField {
    PhoneNumber,
    DisplayName,
    RegisterAddr,
    RegisterPort,
    RegisterUser,
    RegisterPassword,
    RegisterTtl,
    EnableReg,
}

impl SipField {
    pub(crate) const ALL: [SipField; 8] = [
        SipField::PhoneNumber,
        SipField::DisplayName,
        SipField::RegisterAddr,
        SipField::RegisterPort,
        SipField::RegisterUser,
        SipField::RegisterPassword,
        SipField::RegisterTtl,
        SipField::EnableReg,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            SipField::PhoneNumber => "Phone Number",
            SipField::DisplayName => "Display Name",
            SipField::RegisterAddr => "Register Addr",
            SipField::RegisterPort => "Register Port",
            SipField::RegisterUser => "Register User",
            SipField::RegisterPassword => "Register Password",
            SipField::RegisterTtl => "Register TTL",
            SipField::EnableReg => "Enable Reg",
        }
    }

    pub(crate) fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// Field of [`crate::model::SipAccount`] backing a label
pub(crate) fn sip_slot(sip: &mut crate::model::SipAccount, field: SipField) -> &mut String {
    match field {
        SipField::PhoneNumber => &mut sip.phone_number,
        SipField::DisplayName => &mut sip.display_name,
        SipField::RegisterAddr => &mut sip.register_addr,
        SipField::RegisterPort => &mut sip.register_port,
        SipField::RegisterUser => &mut sip.register_user,
        SipField::RegisterPassword => &mut sip.register_password,
        SipField::RegisterTtl => &mut sip.register_ttl,
        SipField::EnableReg => &mut sip.enable_reg,
    }
}

pub(crate) fn sip_value(sip: &crate::model::SipAccount, field: SipField) -> &str {
    match field {
        SipField::PhoneNumber => &sip.phone_number,
        SipField::DisplayName => &sip.display_name,
        SipField::RegisterAddr => &sip.register_addr,
        SipField::RegisterPort => &sip.register_port,
        SipField::RegisterUser => &sip.register_user,
        SipField::RegisterPassword => &sip.register_password,
        SipField::RegisterTtl => &sip.register_ttl,
        SipField::EnableReg => &sip.enable_reg,
    }
}

/// Byte range of the DSS block body: the text after the sub-header up to
/// (not including) the first blank-line terminator.
///
/// Returns `(block_start, body_start, body_end)`; the full block span is
/// `block_start..body_end + BLOCK_TERMINATOR.len()`.
pub(crate) fn locate_dss_block(text: &str) -> Option<(usize, usize, usize)> {
    text.match_indices(DSS_HEADER).find_map(|(start, _)| {
        let rest = text[start + DSS_HEADER.len()..]
            .strip_prefix('\n')?
            .strip_prefix(DSS_SUBHEADER)?;
        let body_start = text.len() - rest.len();
        let body_end = body_start + rest.find(BLOCK_TERMINATOR)?;
        Some((start, body_start, body_end))
    })
}

/// Byte range of the SIP block body, between the header and the first
/// end-of-file marker after it.
///
/// Returns `(block_start, body_start, body_end)`; the full block span is
/// `block_start..body_end + END_OF_FILE.len()`.
pub(crate) fn locate_sip_block(text: &str) -> Option<(usize, usize, usize)> {
    let start = text.find(SIP_HEADER)?;
    let body_start = start + SIP_HEADER.len();
    let body_end = body_start + text[body_start..].find(END_OF_FILE)?;
    Some((start, body_start, body_end))
}
