//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{data_dir, default_config_path, expand_tilde, home_dir};
