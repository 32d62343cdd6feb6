//! Configuration sources layered on top of the merge-policy defaults.

pub mod global_file;
