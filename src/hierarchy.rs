//! Wildcard matching for hierarchical translation keys.
//!
//! Hierarchical facet values arrive as slash-delimited paths with a leading
//! level number and a trailing slash, e.g. `0/Book/Fiction/`. Translation
//! files rarely enumerate every path, so they may store wildcarded ancestor
//! forms like `0/*/Fiction/`. Given a concrete key and a lookup bound to an
//! already-resolved text domain, this module derives the candidate wildcard
//! forms and returns the first real translation.

/// Try to translate a hierarchical key through its wildcard forms.
///
/// Activates only for keys that split on `/` into more than 3 parts, start
/// with a numeric level and end with a slash. At most two candidates are
/// generated, most specific first:
///
/// 1. with more than 4 split parts: `{first}/{second}/*/{second_to_last}/`
/// 2. always: `{first}/*/{second_to_last}/`
///
/// A candidate counts as translated only when `lookup` returns something
/// other than the candidate key itself; a translator that echoes unknown
/// keys back therefore never produces a false positive. Returns `None` when
/// the key is not hierarchical or no candidate has a translation; the
/// caller then falls back to its own default.
pub fn translate_hierarchical<F>(key: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let parts: Vec<&str> = key.split('/').collect();
    if !is_hierarchical(&parts) {
        return None;
    }

    let second_to_last = parts[parts.len() - 2];
    if parts.len() > 4 {
        let candidate = format!("{}/{}/*/{}/", parts[0], parts[1], second_to_last);
        if let Some(translation) = try_candidate(&candidate, &lookup) {
            return Some(translation);
        }
    }

    let candidate = format!("{}/*/{}/", parts[0], second_to_last);
    try_candidate(&candidate, &lookup)
}

/// More than 3 split parts, numeric level first, trailing slash last.
fn is_hierarchical(parts: &[&str]) -> bool {
    parts.len() > 3
        && parts[0].parse::<u64>().is_ok()
        && parts.last().is_some_and(|last| last.is_empty())
}

fn try_candidate<F>(candidate: &str, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(candidate) {
        Some(translation) if translation != candidate => Some(translation),
        _ => None,
    }
}
