//! # sygkro-core
//!
//! Configuration types shared by every sygkro crate: the template manifest
//! (`sygkro.template.yaml`) and the per-project sync record
//! (`.sygkro.sync.yaml`), with YAML load/save helpers.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    read_sync_record, read_template_config, write_sync_record, write_template_config,
};
pub use error::ConfigError;
pub use types::{
    SyncRecord, SyncSource, TemplateConfig, TemplateOptions, TemplatingConfig, Inputs,
    SLUG_DIR, SYNC_RECORD_FILE, TEMPLATE_CONFIG_FILE,
};
