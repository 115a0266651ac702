//! Filesystem side of verification
//!
//! Walking the tree under a root, turning on-disk paths into manifest keys,
//! and hashing file contents.

pub mod hasher;
pub mod path;
pub mod walker;
