//! labore-export
//!
//! Checklist PDF generation: body layout planning plus drawing.

pub mod error;
pub mod fonts;
pub mod layout;
pub mod pdf;
pub mod styles;
