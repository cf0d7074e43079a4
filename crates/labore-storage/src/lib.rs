//! labore-storage
//!
//! JSON files on local disk: the checklist history, the procedure catalog
//! and the app config. Thin layer over `serde_json` and `std::fs`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod paths;
pub mod records;
pub mod state;
