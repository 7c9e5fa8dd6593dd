//! Title similarity between artifacts of the same kind.
//!
//! Scores overlap between lowercased title token sets as
//! |intersection| / max(|a|, |b|). Pairwise scan is O(n^2) per kind,
//! bounded by realistic index sizes.

use rustc_hash::FxHashSet;

use tend_core::types::Artifact;

/// Lowercased whitespace-split token set of a title.
pub fn title_tokens(title: &str) -> FxHashSet<String> {
    title
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Overlap of two token sets in [0, 1]. Empty sets score 0.
pub fn token_overlap(a: &FxHashSet<String>, b: &FxHashSet<String>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    shared as f64 / larger as f64
}

/// Title similarity between two artifacts.
pub fn title_similarity(a: &Artifact, b: &Artifact) -> f64 {
    token_overlap(&title_tokens(&a.title), &title_tokens(&b.title))
}

/// Decides which of a similar pair supersedes the other.
///
/// The artifact with a verification timestamp wins when exactly one has
/// been verified. Otherwise the tie is broken by composite score, and
/// failing that the more recently updated one wins.
pub fn newer_of<'a>(
    a: &'a Artifact,
    b: &'a Artifact,
    score_of: impl Fn(&str) -> Option<f64>,
) -> &'a Artifact {
    match (a.last_verified, b.last_verified) {
        (Some(_), None) => return a,
        (None, Some(_)) => return b,
        _ => {}
    }
    if let (Some(sa), Some(sb)) = (score_of(&a.id), score_of(&b.id)) {
        if sa > sb {
            return a;
        }
        if sb > sa {
            return b;
        }
    }
    let ua = a.updated_at.or(a.created_at).unwrap_or(0);
    let ub = b.updated_at.or(b.created_at).unwrap_or(0);
    if ub > ua {
        b
    } else {
        a
    }
}
