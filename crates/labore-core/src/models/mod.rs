pub mod exam;
pub mod procedure;
pub mod record;
