/*!
Duplicate-information detection.

Names, labels and descriptions frequently repeat each other ("Search" /
"Search field", or a description that copies the label). These helpers
decide when a second string adds nothing over the first.
*/

/// Similarity at or above which two strings are considered redundant.
pub const DEFAULT_REDUNDANCY_THRESHOLD: f64 = 0.7;

/// Containment only counts for strings of at least this many words.
const MIN_CONTAINED_WORDS: usize = 4;

/// Whether `a` and `b` carry the same information.
///
/// 1. If either trimmed string has at least four words and is contained in
///    the other (ignoring case), they are redundant.
/// 2. Otherwise they are redundant when [`similarity`] reaches `threshold`.
///
/// Empty strings are never redundant.
///
/// ```
/// use lectern::is_redundant;
///
/// assert!(is_redundant("Name Required Field Entry", "Name Required Field", 0.7));
/// assert!(!is_redundant("abc", "xyz", 0.7));
/// ```
pub fn is_redundant(a: &str, b: &str, threshold: f64) -> bool {
  let a = a.trim();
  let b = b.trim();
  if a.is_empty() || b.is_empty() {
    return false;
  }

  let a_lower = a.to_lowercase();
  let b_lower = b.to_lowercase();
  let contained = |needle: &str, haystack: &str| {
    needle.split_whitespace().count() >= MIN_CONTAINED_WORDS && haystack.contains(needle)
  };
  if contained(&a_lower, &b_lower) || contained(&b_lower, &a_lower) {
    return true;
  }

  let ratio = similarity(&a_lower, &b_lower);
  log::trace!("similarity of '{a}' and '{b}': {ratio} (threshold {threshold})");
  ratio >= threshold
}

/// Case-insensitive similarity in `[0, 1]`: twice the longest common
/// subsequence of characters over the combined length, rounded to two
/// decimals.
///
/// ```
/// use lectern::similarity;
///
/// assert_eq!(similarity("Submit", "submit"), 1.0);
/// assert_eq!(similarity("abc", "xyz"), 0.0);
/// ```
#[allow(clippy::cast_precision_loss)] // Lengths of UI strings are far below 2^52
pub fn similarity(a: &str, b: &str) -> f64 {
  let a: Vec<char> = a.to_lowercase().chars().collect();
  let b: Vec<char> = b.to_lowercase().chars().collect();
  let total = a.len() + b.len();
  if total == 0 {
    return 1.0;
  }
  let ratio = (2 * lcs_len(&a, &b)) as f64 / total as f64;
  (ratio * 100.0).round() / 100.0
}

/// Length of the longest common subsequence, in O(len(b)) space.
fn lcs_len(a: &[char], b: &[char]) -> usize {
  let mut prev = vec![0usize; b.len() + 1];
  let mut curr = vec![0usize; b.len() + 1];
  for ca in a {
    for (j, cb) in b.iter().enumerate() {
      let best = if ca == cb {
        prev.get(j).copied().unwrap_or_default() + 1
      } else {
        let up = prev.get(j + 1).copied().unwrap_or_default();
        let left = curr.get(j).copied().unwrap_or_default();
        up.max(left)
      };
      if let Some(slot) = curr.get_mut(j + 1) {
        *slot = best;
      }
    }
    std::mem::swap(&mut prev, &mut curr);
  }
  prev.last().copied().unwrap_or_default()
}
