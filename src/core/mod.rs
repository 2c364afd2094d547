//! Transaction services and filesystem helpers.

pub mod services;
pub mod utils;
