//! # sygkro-engine
//!
//! Placeholder rendering for sygkro templates: `{{ .name }}` expressions in
//! file paths and contents, no-render regions, and skip-render globs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sygkro_core::Inputs;
//! use sygkro_engine::render_template;
//!
//! fn render(template_dir: &Path, target: &Path, inputs: &Inputs) {
//!     if let Err(err) = render_template(template_dir, target, inputs) {
//!         eprintln!("render failed: {err}");
//!     }
//! }
//! ```

pub mod error;
pub mod raw;
pub mod render;

pub use error::RenderError;
pub use raw::{postprocess_raw_blocks, preprocess_raw_blocks, RawBlocks};
pub use render::{process_template_dir, render_string, render_template};
