//! Domain types for sygkro configuration files.
//!
//! Input maps are `BTreeMap` rather than `HashMap` so that serialization and
//! prompting iterate keys in a stable order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Template manifest filename, at the template repository root.
pub const TEMPLATE_CONFIG_FILE: &str = "sygkro.template.yaml";

/// Per-project sync record filename, at the project root.
pub const SYNC_RECORD_FILE: &str = ".sygkro.sync.yaml";

/// The literal name of the renderable subdirectory inside a template.
///
/// This is a sentinel, not a computed name: the directory on disk is spelled
/// exactly like this, placeholder braces included.
pub const SLUG_DIR: &str = "{{ .slug }}";

/// Placeholder name → value mapping used for rendering.
pub type Inputs = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Template manifest
// ---------------------------------------------------------------------------

/// Contents of `sygkro.template.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TemplateConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub templating: TemplatingConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TemplateOptions>,
}

/// The `templating:` section — permitted input names with their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TemplatingConfig {
    #[serde(default)]
    pub inputs: Inputs,
}

/// The optional `options:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TemplateOptions {
    /// Globs (matched against the unrendered relative path) whose files are
    /// copied verbatim instead of rendered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_render: Vec<String>,
}

// ---------------------------------------------------------------------------
// Sync record
// ---------------------------------------------------------------------------

/// Contents of `.sygkro.sync.yaml` — binds a project to its template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SyncRecord {
    pub source: SyncSource,
    #[serde(default)]
    pub inputs: Inputs,
}

/// The `source:` section of the sync record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SyncSource {
    /// The original template reference string, exactly as the user gave it.
    pub template_path: String,
    pub template_name: String,
    /// Commit SHA at the last successful sync; empty when never synced.
    #[serde(default)]
    pub template_version: String,
    /// Short name of the branch or tag being tracked.
    #[serde(default)]
    pub template_tracking_ref: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
