//! labore-core
//!
//! Pure domain types for the Labore checklist system: records, procedure
//! definitions, exam types, the procedure ordering rule, CPF helpers and
//! form validation. No filesystem or PDF dependency.

pub mod error;
pub mod models;
pub mod national_id;
pub mod procedures;
pub mod selection;
pub mod validation;
