//! Unified diff between two rendered template trees.
//!
//! Display only — the merge path never consumes this output.

use std::path::Path;

use similar::TextDiff;

use crate::error::{io_err, SyncError};
use crate::merge::collect_files;

/// Header prefix for the old-version side.
pub const OLD_PREFIX: &str = "upstream-template-old";
/// Header prefix for the new-version side.
pub const NEW_PREFIX: &str = "upstream-template-new";

/// Produce a unified diff between two directory trees.
///
/// Header lines use the logical `upstream-template-old/` and
/// `upstream-template-new/` prefixes; files present on only one side diff
/// against empty content. Returns an empty string when the trees agree.
pub fn diff_dirs(old_dir: &Path, new_dir: &Path) -> Result<String, SyncError> {
    let old_files = collect_files(old_dir)?;
    let new_files = collect_files(new_dir)?;

    let mut out = String::new();
    for rel in old_files.union(&new_files) {
        let old_content = read_or_empty(&old_dir.join(rel))?;
        let new_content = read_or_empty(&new_dir.join(rel))?;
        if old_content == new_content {
            continue;
        }

        let old_header = format!("{OLD_PREFIX}/{}", rel.display());
        let new_header = format!("{NEW_PREFIX}/{}", rel.display());
        let unified = TextDiff::from_lines(&old_content, &new_content)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();
        out.push_str(&unified);
        if !unified.ends_with('\n') {
            out.push('\n');
        }
    }

    Ok(out)
}

fn read_or_empty(path: &Path) -> Result<String, SyncError> {
    if !path.is_file() {
        return Ok(String::new());
    }
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
