use crate::filter::classes;
use color_eyre::Result;
use itertools::Itertools;
use tracing::debug;

/// Groups words by frequency, then keeps each singleton class whose frequency
/// no other class dominates.
///
/// Every class is a potential dominator, including classes with several
/// members: `["ab", "ba", "a"]` must drop `"a"` even though the only
/// frequency that covers it belongs to a pair of anagrams.
pub fn filter(words: &[String]) -> Result<Vec<String>> {
    let classes = classes(words)?;
    let candidates = classes
        .iter()
        .filter_map(|class| class.singleton().map(|word| (&class.frequency, word)))
        .collect_vec();

    let survivors = candidates
        .iter()
        .filter(|(frequency, _)| !classes.iter().any(|other| other.frequency.dominates(frequency)))
        .map(|(_, word)| word.to_string())
        .collect_vec();
    debug!(
        input = words.len(),
        classes = classes.len(),
        candidates = candidates.len(),
        survivors = survivors.len(),
        "pairwise done"
    );
    Ok(survivors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(list: &[&str]) -> Vec<String> {
        filter(&list.iter().map(|w| w.to_string()).collect_vec())
            .unwrap()
            .into_iter()
            .sorted()
            .collect()
    }

    #[test]
    fn test_anagram_class_still_dominates() {
        assert!(run(&["ab", "ba", "a"]).is_empty());
        assert_eq!(run(&["abc", "bca", "ab", "d"]), ["d"]);
    }

    #[test]
    fn test_singletons_compared_against_each_other() {
        assert_eq!(run(&["a", "aa", "aaa", "b"]), ["aaa", "b"]);
        assert_eq!(run(&["abc", "def", "ghi"]), ["abc", "def", "ghi"]);
    }

    #[test]
    fn test_empty() {
        assert!(run(&[]).is_empty());
        assert_eq!(run(&[""]), [""]);
        assert_eq!(run(&["", "q"]), ["q"]);
    }
}
