//! Command implementations for the sygkro CLI.

pub mod create;
pub mod diff;
pub mod link;
pub mod project;
pub mod sync;
pub mod template;

use anyhow::{bail, Context, Result};

use sygkro_core::{read_template_config, TemplateConfig, SLUG_DIR, TEMPLATE_CONFIG_FILE};
use sygkro_vcs::ResolvedTemplate;

/// Validate a resolved template's shape and load its manifest.
pub(crate) fn load_template(resolved: &ResolvedTemplate) -> Result<TemplateConfig> {
    if !resolved.path.exists() {
        bail!(
            "template directory {} does not exist",
            resolved.path.display()
        );
    }
    if !resolved.path.join(SLUG_DIR).is_dir() {
        bail!(
            "template directory {} must contain a subdirectory named '{SLUG_DIR}'",
            resolved.path.display()
        );
    }
    read_template_config(&resolved.path.join(TEMPLATE_CONFIG_FILE)).with_context(|| {
        format!(
            "failed to read template config in {}",
            resolved.path.display()
        )
    })
}

/// Short name of a ref: `refs/heads/main` or `main` both give `main`.
pub(crate) fn short_ref(head_ref: &str) -> String {
    head_ref
        .rsplit('/')
        .next()
        .unwrap_or(head_ref)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::short_ref;

    #[test]
    fn short_ref_strips_ref_prefixes() {
        assert_eq!(short_ref("refs/heads/main"), "main");
        assert_eq!(short_ref("refs/tags/v1.0.0"), "v1.0.0");
        assert_eq!(short_ref("main"), "main");
        assert_eq!(short_ref(""), "");
    }
}
