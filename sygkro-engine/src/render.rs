//! Placeholder substitution and template-tree processing.
//!
//! The placeholder dialect is deliberately small: `{{ .name }}` (whitespace
//! optional) expands to the value of `name` in the inputs map, a missing key
//! expands to the empty string, and any other closed `{{ … }}` directive
//! passes through unchanged. Neither conditionals nor loops exist.

use std::fs;
use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use sygkro_core::{
    read_template_config, Inputs, TemplateOptions, SLUG_DIR, TEMPLATE_CONFIG_FILE,
};

use crate::error::{io_err, RenderError};
use crate::raw::{postprocess_raw_blocks, preprocess_raw_blocks};

// ---------------------------------------------------------------------------
// String rendering
// ---------------------------------------------------------------------------

/// Render a single template string against `inputs`.
///
/// Errors only on a `{{` that is never closed; everything else renders.
pub fn render_string(template: &str, inputs: &Inputs) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let directive_start = &rest[start..];
        let Some(end) = directive_start.find("}}") else {
            return Err(RenderError::UnclosedPlaceholder {
                snippet: directive_start.chars().take(32).collect(),
            });
        };
        let directive = &directive_start[2..end];
        match placeholder_key(directive) {
            Some(key) => {
                // Missing keys expand to the empty string.
                if let Some(value) = inputs.get(key) {
                    out.push_str(value);
                }
            }
            // Not a placeholder (comments, unknown directives): pass through.
            None => out.push_str(&directive_start[..end + 2]),
        }
        rest = &directive_start[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Extract the key from a `.name`-form directive body, or `None` if the body
/// is anything else.
fn placeholder_key(directive: &str) -> Option<&str> {
    let body = directive.trim();
    let key = body.strip_prefix('.')?;
    if key.is_empty() {
        return None;
    }
    key.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        .then_some(key)
}

// ---------------------------------------------------------------------------
// Tree processing
// ---------------------------------------------------------------------------

/// Render a whole template tree from `source_dir` into `target_dir`.
///
/// Every relative path and every file content is rendered against `inputs`;
/// files matching a `skip_render` glob (against the *unrendered* relative
/// path) are copied verbatim. File and directory modes are preserved.
///
/// Output is deterministic for a fixed (source tree, inputs, options).
pub fn process_template_dir(
    source_dir: &Path,
    target_dir: &Path,
    inputs: &Inputs,
    options: Option<&TemplateOptions>,
) -> Result<(), RenderError> {
    let skip_set = build_skip_set(options)?;

    for entry in WalkDir::new(source_dir) {
        let entry = entry.map_err(|e| RenderError::Walk {
            path: source_dir.to_path_buf(),
            source: e,
        })?;
        if entry.depth() == 0 {
            fs::create_dir_all(target_dir).map_err(|e| io_err(target_dir, e))?;
            continue;
        }

        let path = entry.path();
        let rel = match path.strip_prefix(source_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let rel_str = rel.to_str().ok_or_else(|| RenderError::NonUtf8Path {
            path: path.to_path_buf(),
        })?;
        let rendered_rel = render_string(rel_str, inputs)?;
        let target = target_dir.join(&rendered_rel);
        let metadata = entry.metadata().map_err(|e| RenderError::Walk {
            path: path.to_path_buf(),
            source: e,
        })?;

        if metadata.is_dir() {
            fs::create_dir_all(&target).map_err(|e| io_err(&target, e))?;
            copy_mode(&metadata, &target)?;
            continue;
        }
        if !metadata.is_file() {
            continue;
        }

        if skip_set.is_match(rel) {
            tracing::debug!("copying verbatim: {rel_str}");
            let content = fs::read(path).map_err(|e| io_err(path, e))?;
            fs::write(&target, content).map_err(|e| io_err(&target, e))?;
            copy_mode(&metadata, &target)?;
            continue;
        }

        let bytes = fs::read(path).map_err(|e| io_err(path, e))?;
        match String::from_utf8(bytes) {
            Ok(text) => {
                let (processed, raw_blocks) = preprocess_raw_blocks(&text);
                let rendered = render_string(&processed, inputs)?;
                let output = postprocess_raw_blocks(&rendered, &raw_blocks);
                tracing::debug!("rendered: {rel_str} -> {rendered_rel}");
                fs::write(&target, output).map_err(|e| io_err(&target, e))?;
            }
            // Binary content is never rendered; copy the bytes untouched.
            Err(not_utf8) => {
                tracing::debug!("copying binary: {rel_str}");
                fs::write(&target, not_utf8.into_bytes()).map_err(|e| io_err(&target, e))?;
            }
        }
        copy_mode(&metadata, &target)?;
    }

    Ok(())
}

/// Render a full template (manifest + `{{ .slug }}` subtree) into `target_dir`.
///
/// Fails if the manifest is missing or the template has no `{{ .slug }}`
/// subdirectory. The presence check is on the literal directory name.
pub fn render_template(
    template_dir: &Path,
    target_dir: &Path,
    inputs: &Inputs,
) -> Result<(), RenderError> {
    let config = read_template_config(&template_dir.join(TEMPLATE_CONFIG_FILE))?;

    let slug_dir = template_dir.join(SLUG_DIR);
    if !slug_dir.is_dir() {
        return Err(RenderError::MissingSlugDir {
            path: template_dir.to_path_buf(),
        });
    }

    process_template_dir(&slug_dir, target_dir, inputs, config.options.as_ref())
}

fn build_skip_set(options: Option<&TemplateOptions>) -> Result<GlobSet, RenderError> {
    let mut builder = GlobSetBuilder::new();
    if let Some(opts) = options {
        for pattern in &opts.skip_render {
            // Shell-glob semantics: `*` and `?` stop at path separators.
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| RenderError::Pattern {
                    pattern: pattern.clone(),
                    source: e,
                })?;
            builder.add(glob);
        }
    }
    builder.build().map_err(|e| RenderError::Pattern {
        pattern: "skip_render".to_string(),
        source: e,
    })
}

#[cfg(unix)]
fn copy_mode(metadata: &fs::Metadata, target: &Path) -> Result<(), RenderError> {
    use std::os::unix::fs::PermissionsExt;
    let mode = metadata.permissions().mode();
    fs::set_permissions(target, fs::Permissions::from_mode(mode)).map_err(|e| io_err(target, e))
}

#[cfg(not(unix))]
fn copy_mode(_metadata: &fs::Metadata, _target: &Path) -> Result<(), RenderError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
