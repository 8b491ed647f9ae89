pub mod field_input;
pub mod header;
