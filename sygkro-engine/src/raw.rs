//! No-render regions.
//!
//! Template content may legitimately contain `{{ … }}` text that must not be
//! substituted. Such spans are fenced with a sentinel pair:
//!
//! ```text
//! {{/* no_render:start */}} …CONTENT… {{/* no_render:end */}}
//! ```
//!
//! [`preprocess_raw_blocks`] swaps each fenced span (sentinels excluded) for a
//! unique `__NO_RENDER_BLOCK_<n>__` token before rendering;
//! [`postprocess_raw_blocks`] substitutes the original content back afterwards.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Token → original content mapping produced by preprocessing.
pub type RawBlocks = BTreeMap<String, String>;

// Non-greedy, DOTALL; whitespace tolerated around the keyword inside the
// comment body. An open sentinel without a matching close does not match and
// passes through untouched.
static RAW_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{/\*\s*no_render:start\s*\*/\}\}(.*?)\{\{/\*\s*no_render:end\s*\*/\}\}")
        .expect("raw block pattern is valid")
});

/// Replace every fenced span with a unique token, in source order from zero.
///
/// Returns the processed content and the token → content map.
pub fn preprocess_raw_blocks(content: &str) -> (String, RawBlocks) {
    let mut blocks = RawBlocks::new();
    let mut index = 0usize;
    let processed = RAW_BLOCK.replace_all(content, |caps: &regex::Captures<'_>| {
        let token = format!("__NO_RENDER_BLOCK_{index}__");
        blocks.insert(token.clone(), caps[1].to_string());
        index += 1;
        token
    });
    (processed.into_owned(), blocks)
}

/// Substitute every token back with its original content.
///
/// Tokens are disjoint by construction, so substitution order is irrelevant.
pub fn postprocess_raw_blocks(content: &str, blocks: &RawBlocks) -> String {
    let mut out = content.to_string();
    for (token, raw) in blocks {
        out = out.replace(token, raw);
    }
    out
}
