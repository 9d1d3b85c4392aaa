pub mod error;
pub mod expectation;
pub mod field_set;
pub mod report;
pub mod value_path;
