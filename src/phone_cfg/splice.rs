//! Write path: put freshly formatted blocks back into a document
//!
//! Only the first DSS block and the first SIP block are touched. All other
//! bytes of the document are carried over unchanged.

use tracing::warn;

use super::{
    format_dss_block, format_sip_block, locate_dss_block, locate_sip_block, BLOCK_TERMINATOR,
    DSS_HEADER, END_OF_FILE, SIP_HEADER,
};
use crate::model::{DssKey, SipAccount};

/// Format `keys` and `sip` and splice them into `original`.
pub fn render_config(original: &str, keys: &[DssKey], sip: &SipAccount) -> String {
    splice_config(original, &format_dss_block(keys), &format_sip_block(sip))
}

/// Replace the DSS and SIP blocks of `original` with the given block text.
///
/// The DSS block is spliced first: replaced in place when present,
/// otherwise prepended. The SIP block is then spliced into that result:
/// replaced in place when present, otherwise appended after trimming
/// trailing whitespace.
pub fn splice_config(original: &str, dss_block: &str, sip_block: &str) -> String {
    let with_dss = splice_dss(original, dss_block);
    splice_sip(&with_dss, sip_block)
}

fn splice_dss(text: &str, dss_block: &str) -> String {
    if !text.contains(DSS_HEADER) {
        return format!("{dss_block}\n{text}");
    }
    match locate_dss_block(text) {
        Some((start, _, body_end)) => {
            let end = body_end + BLOCK_TERMINATOR.len();
            let mut out = String::with_capacity(text.len() + dss_block.len());
            out.push_str(&text[..start]);
            out.push_str(dss_block);
            out.push('\n');
            out.push_str(&text[end..]);
            out
        }
        None => {
            warn!("DSS header present but block is not terminated; leaving DSS keys unchanged");
            text.to_string()
        }
    }
}

fn splice_sip(text: &str, sip_block: &str) -> String {
    if !text.contains(SIP_HEADER) {
        return format!("{}\n{sip_block}", text.trim_end());
    }
    match locate_sip_block(text) {
        Some((start, _, body_end)) => {
            let end = body_end + END_OF_FILE.len();
            let mut out = String::with_capacity(text.len() + sip_block.len());
            out.push_str(&text[..start]);
            out.push_str(sip_block);
            out.push_str(&text[end..]);
            out
        }
        None => {
            warn!("SIP header present without end-of-file marker; leaving SIP account unchanged");
            text.to_string()
        }
    }
}
