//! File sources feeding the configuration builder.

pub mod global_file;
pub mod local_file;
