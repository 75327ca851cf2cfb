//! FANVIL-CFG - desk phone configuration editor
//!
//! Reads and rewrites the DSS key table and the SIP1 account of Fanvil
//! `.cfg` files while leaving every other line of the file untouched.
//!
//! ## Data flow
//! Read:  storage -> [`phone_cfg::parse_config`] -> records
//! Write: records + original text -> [`phone_cfg::render_config`] -> storage
//!
//! ## Quick Start
//!
//! ```rust
//! use fanvil_cfg::model::DssKey;
//! use fanvil_cfg::phone_cfg::{extract_dss_keys, format_dss_block};
//!
//! let keys = vec![DssKey::new(1, 1, "100", "Reception").with_icon("Red")];
//! let text = format!("{}\n", format_dss_block(&keys));
//! assert_eq!(extract_dss_keys(&text), keys);
//! ```

// Core error handling
pub mod error;

// Records exchanged with the editor
pub mod model;

// Text format: parse, format, splice
pub mod phone_cfg;

// File storage and runtime settings
pub mod settings;
pub mod storage;

// REST API (when enabled)
#[cfg(feature = "server")]
pub mod api;

pub use error::{ApiError, StorageError};
pub use model::{ConfigDocument, DssKey, SaveResponse, SipAccount};
pub use settings::Settings;
pub use storage::{ConfigStore, LocalConfigStore};
