use crate::{
    filter::{classes, Class},
    words::{Frequency, Letter, LetterMap},
};
use bit_set::BitSet;
use color_eyre::Result;
use std::cmp::Reverse;
use tracing::debug;

/// Inverted index over admitted classes, keyed by (letter, exact count).
#[derive(Debug)]
struct CountIndex {
    /// `by_count[letter][k]` holds the ids of admitted classes with exactly
    /// `k` copies of `letter`. Only non-zero counts are registered.
    by_count: LetterMap<Vec<BitSet>>,
}

impl CountIndex {
    /// `depth` is one more than the highest count that will be registered.
    fn new(depth: usize, capacity: usize) -> Self {
        Self {
            by_count: LetterMap::from_fn(|_| {
                (0..depth).map(|_| BitSet::with_capacity(capacity)).collect()
            }),
        }
    }

    fn insert(&mut self, id: usize, frequency: &Frequency) {
        for (letter, count) in frequency.letters() {
            self.by_count[letter][count as usize].insert(id);
        }
    }

    /// Admitted ids holding more than `count` copies of `letter`.
    fn above(&self, letter: Letter, count: u8) -> impl Iterator<Item = usize> + '_ {
        self.by_count[letter][count as usize + 1..]
            .iter()
            .flat_map(BitSet::iter)
    }

    /// Finds an admitted class that dominates `frequency`.
    ///
    /// A dominator has strictly more of at least one letter, so it shows up in
    /// some `above` list; each id is verified in full at most once.
    fn dominator(&self, frequency: &Frequency, classes: &[Class<'_>]) -> Option<usize> {
        let mut checked: BitSet = BitSet::with_capacity(classes.len());
        Letter::all()
            .flat_map(|letter| self.above(letter, frequency.count(letter)))
            .filter(|&id| checked.insert(id))
            .find(|&id| classes[id].frequency.dominates(frequency))
    }
}

/// Walks the anagram classes from heaviest to lightest, admitting each class
/// that no previously admitted class dominates.
///
/// A frequency can only be dominated by one with a strictly larger total, and
/// every such class has been visited before it. Dominance is transitive, so a
/// dominated class never needs to be registered: its dominator already covers
/// everything it would. Classes with several members are still registered,
/// since they dominate lighter words even though they never survive.
pub fn filter(words: &[String]) -> Result<Vec<String>> {
    let mut classes = classes(words)?;
    classes.sort_by_key(|class| Reverse(class.frequency.total()));

    let depth = classes
        .iter()
        .map(|class| class.frequency.max_count() as usize)
        .max()
        .unwrap_or_default()
        + 1;
    let mut index = CountIndex::new(depth, classes.len());

    let mut admitted = 0usize;
    let mut survivors = Vec::new();
    for (id, class) in classes.iter().enumerate() {
        if let Some(by) = index.dominator(&class.frequency, &classes) {
            debug!(word = class.members[0], by = classes[by].members[0], "dominated");
            continue;
        }
        index.insert(id, &class.frequency);
        admitted += 1;
        if let Some(word) = class.singleton() {
            survivors.push(word.to_string());
        }
    }

    debug!(
        input = words.len(),
        classes = classes.len(),
        admitted,
        depth,
        survivors = survivors.len(),
        "indexed done"
    );
    Ok(survivors)
}
