/// Utility modules for common functionality
pub mod datetime;
pub mod string_utils;
pub mod timezone;
pub mod validation;
