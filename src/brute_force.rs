use crate::words::{sorted_letters, Letter};
use color_eyre::Result;
use tracing::debug;

/// Removes anagrams and sub-anagrams by comparing every ordered pair of words.
///
/// Works on sorted letter sequences only, without building frequency vectors.
/// Survivors are returned in input order.
pub fn filter(words: &[String]) -> Result<Vec<String>> {
    let sorted = words
        .iter()
        .map(|word| sorted_letters(word))
        .collect::<Result<Vec<_>>>()?;

    let mut removed = vec![false; words.len()];
    for (i, word) in sorted.iter().enumerate() {
        for (j, other) in sorted.iter().enumerate() {
            if i == j {
                continue;
            }
            if word == other {
                removed[i] = true;
                removed[j] = true;
            } else if is_sub_anagram(word, other) {
                removed[i] = true;
            }
        }
    }

    let survivors: Vec<String> = words
        .iter()
        .zip(&removed)
        .filter(|&(_, &removed)| !removed)
        .map(|(word, _)| word.clone())
        .collect();
    debug!(input = words.len(), survivors = survivors.len(), "brute force done");
    Ok(survivors)
}

/// Whether `smaller` is a proper sub-multiset of `larger`; both must be sorted.
///
/// For sorted sequences this is a subsequence test, which compares the same
/// per-letter counts in a single merge pass.
fn is_sub_anagram(smaller: &[Letter], larger: &[Letter]) -> bool {
    if smaller.len() >= larger.len() {
        return false;
    }
    let mut larger = larger.iter();
    smaller
        .iter()
        .all(|letter| larger.any(|candidate| candidate == letter))
}
