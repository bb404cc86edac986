//! "Did you mean" suggestions for missing keys.

use strsim::levenshtein;

/// Compute up to three keys from `available` that are close to `key`.
///
/// Keys of three characters or fewer accept an edit distance of 1; longer
/// keys accept 2. Results are ordered by distance, then alphabetically.
///
/// ```
/// use tolk::compute_suggestions;
///
/// let available = vec!["greeting".to_string(), "goodbye".to_string()];
/// assert_eq!(compute_suggestions("greting", &available), vec!["greeting"]);
/// ```
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
