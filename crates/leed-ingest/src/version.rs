//! LEED version string normalisation.

use std::sync::LazyLock;

use regex::Regex;

/// Leading `v`, `LEED`, `LEED-`, `LEED v` and similar.
static VERSION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(v|leed[\s-]*v?)\s*").expect("Invalid version prefix regex"));

/// Canonicalises a rating-system version.
///
/// Strips a `v` or `LEED` prefix, maps `_` to `.`, and writes a bare major
/// number as `<major>.0`, so `v4`, `LEED 4`, `4_0` and `4.0` all become
/// `4.0`. Empty input stays empty.
pub fn normalize_leed_version(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped = VERSION_PREFIX.replace(&lowered, "");
    let dotted = stripped.replace('_', ".");
    let version = dotted.trim();
    if !version.is_empty() && version.chars().all(|ch| ch.is_ascii_digit()) && version.len() <= 2
    {
        return format!("{version}.0");
    }
    version.to_string()
}
