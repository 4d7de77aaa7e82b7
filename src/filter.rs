use crate::{brute_force, indexed, pairwise, words::Frequency};
use color_eyre::{eyre::eyre, Result};
use itertools::Itertools;
use std::fmt;

/// Every filter takes the input words and returns the survivors.
pub type FilterFn = fn(&[String]) -> Result<Vec<String>>;

/// Static descriptor of one filter implementation.
#[derive(Clone, Copy)]
pub struct Variant {
    /// Short identifier used on the command line.
    pub key: &'static str,
    /// Column heading in benchmark tables.
    pub label: &'static str,
    pub name: &'static str,
    pub complexity: &'static str,
    pub run: FilterFn,
}

pub static VARIANTS: [Variant; 3] = [
    Variant {
        key: "brute-force",
        label: "Brute Force",
        name: "1. Brute Force",
        complexity: "Time: O(n² · m), Space: O(n · m)",
        run: brute_force::filter,
    },
    Variant {
        key: "pairwise",
        label: "Pairwise",
        name: "2. Frequency Vectors + Pairwise",
        complexity: "Time: O(n · m + g² · 26), Space: O(g · 26)",
        run: pairwise::filter,
    },
    Variant {
        key: "indexed",
        label: "Indexed",
        name: "3. Inverted Count Index",
        complexity: "Time: O(n · m + g · 26 · L), Space: O(26 · L · g/64)",
        run: indexed::filter,
    },
];

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Variant {
    pub fn by_key(key: &str) -> Result<&'static Variant> {
        VARIANTS.iter().find(|v| v.key == key).ok_or_else(|| {
            eyre!(
                "unknown variant {key:?}, expected one of: {}",
                VARIANTS.iter().map(|v| v.key).join(", ")
            )
        })
    }

    pub fn filter(&self, words: &[String]) -> Result<Vec<String>> {
        (self.run)(words)
    }
}

/// The input words sharing one frequency.
#[derive(Debug, Clone)]
pub struct Class<'a> {
    pub frequency: Frequency,
    pub members: Vec<&'a str>,
}

impl<'a> Class<'a> {
    /// The only member, if the class has exactly one. Words in larger classes
    /// are anagrams of each other and never survive.
    pub fn singleton(&self) -> Option<&'a str> {
        self.members.iter().copied().exactly_one().ok()
    }
}

/// Groups `words` into anagram classes, in no particular order.
pub fn classes(words: &[String]) -> Result<Vec<Class<'_>>> {
    let encoded = words
        .iter()
        .map(|word| Frequency::encode(word).map(|frequency| (frequency, word.as_str())))
        .collect::<Result<Vec<_>>>()?;
    Ok(encoded
        .into_iter()
        .into_group_map()
        .into_iter()
        .map(|(frequency, members)| Class { frequency, members })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_classes() {
        let input = words(&["cat", "act", "dog", "cat", "god", "a"]);
        let classes = classes(&input).unwrap();
        assert_eq!(classes.len(), 3);

        let sizes = classes
            .iter()
            .map(|c| (c.frequency.total(), c.members.len()))
            .sorted()
            .collect_vec();
        assert_eq!(sizes, [(1, 1), (3, 2), (3, 3)]);

        let singles = classes.iter().filter_map(Class::singleton).collect_vec();
        assert_eq!(singles, ["a"]);
    }

    #[test]
    fn test_classes_rejects_invalid_words() {
        let err = classes(&words(&["ok", "Nope"])).unwrap_err();
        assert!(format!("{err:?}").contains("Nope"));
    }

    #[test]
    fn test_by_key() {
        for variant in &VARIANTS {
            assert_eq!(Variant::by_key(variant.key).unwrap().name, variant.name);
        }
        let err = Variant::by_key("bitset").unwrap_err();
        assert!(err.to_string().contains("brute-force, pairwise, indexed"));
    }
}
