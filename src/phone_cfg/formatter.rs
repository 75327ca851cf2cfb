//! Records -> canonical block text
//!
//! Output matches what the phone itself writes, so a file that went through
//! [`super::parser`] and back is unchanged.

use std::fmt::Write;

use super::{
    sip_value, DssField, SipField, DSS_FIELD_WIDTH, DSS_HEADER, DSS_SUBHEADER, END_OF_FILE,
    SIP_HEADER, SIP_LABEL_WIDTH,
};
use crate::model::{DssKey, SipAccount};

/// Render the DSS module.
///
/// Keys are written in the order given, not re-sorted by slot. The result
/// ends with a single line break; the splicer adds the blank line that
/// closes the block.
pub fn format_dss_block(keys: &[DssKey]) -> String {
    let mut out = String::new();
    out.push_str(DSS_HEADER);
    out.push('\n');
    out.push_str(DSS_SUBHEADER);
    out.push('\n');
    for key in keys {
        for field in DssField::ALL {
            let _ = writeln!(
                out,
                "Fkey{} {:<width$}:{}",
                key.index,
                field.name(),
                dss_field_value(key, field),
                width = DSS_FIELD_WIDTH
            );
        }
    }
    out
}

fn dss_field_value(key: &DssKey, field: DssField) -> String {
    match field {
        DssField::Type => key.key_type.to_string(),
        DssField::Value => key.value.clone(),
        DssField::Title => key.label.clone(),
        DssField::Icon => key.icon.clone(),
    }
}

/// Render the SIP module, closed by the end-of-file marker with no trailing
/// line break.
pub fn format_sip_block(sip: &SipAccount) -> String {
    let mut out = String::new();
    out.push_str(SIP_HEADER);
    out.push('\n');
    for field in SipField::ALL {
        let _ = writeln!(
            out,
            "SIP1 {:<width$}:{}",
            field.label(),
            sip_value(sip, field),
            width = SIP_LABEL_WIDTH
        );
    }
    out.push_str(END_OF_FILE);
    out
}
