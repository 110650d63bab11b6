//! Local-modification detection
//!
//! Decides whether a previously distributed file has been hand-edited in the
//! project since the last sync. Content comparison uses a quick similarity
//! ratio (common-character accounting, near-linear) rather than an exact
//! diff: the common case of an unmodified file is cheap to confirm, and a
//! false negative only costs an overwrite of a file the ratio judged
//! unchanged. A genuine edit is additionally required to leave the
//! destination's mtime strictly newer than the source's, so a re-copied but
//! identical-content file is never flagged.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Quick approximate similarity of two texts in the 0.0..=1.0 range.
///
/// Counts how many characters of `a` can be matched against the character
/// multiset of `b`; the ratio is `2 * matches / (len(a) + len(b))`. An upper
/// bound on true sequence similarity. Two empty texts are fully similar.
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a + len_b == 0 {
        return 1.0;
    }

    let mut counts = std::collections::HashMap::new();
    for ch in b.chars() {
        *counts.entry(ch).or_insert(0usize) += 1;
    }

    let mut matches = 0usize;
    for ch in a.chars() {
        if let Some(count) = counts.get_mut(&ch) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    2.0 * matches as f64 / (len_a + len_b) as f64
}

/// Whether `dst` has been locally modified relative to `src`.
///
/// Returns false when `dst` does not exist (nothing to protect). Otherwise
/// the destination counts as modified only when its content diverges from
/// the source (quick ratio below 1.0) AND its modification time is strictly
/// newer than the source's.
pub fn is_locally_modified(src: &Path, dst: &Path) -> Result<bool> {
    if !dst.exists() {
        return Ok(false);
    }

    let src_text = String::from_utf8_lossy(&fs::read(src)?).into_owned();
    let dst_text = String::from_utf8_lossy(&fs::read(dst)?).into_owned();
    if quick_ratio(&dst_text, &src_text) >= 1.0 {
        return Ok(false);
    }

    let src_mtime = fs::metadata(src)?.modified()?;
    let dst_mtime = fs::metadata(dst)?.modified()?;
    Ok(dst_mtime > src_mtime)
}
