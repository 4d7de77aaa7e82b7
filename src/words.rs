use color_eyre::{
    eyre::{bail, eyre, WrapErr},
    Report, Result,
};
use std::{
    fmt::{self, Debug, Display, Write},
    ops::{Index, IndexMut},
};

/// Number of letters in the accepted alphabet (`a..=z`).
pub const ALPHABET: usize = 26;

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Letter(u8);

impl Letter {
    pub const fn new(letter: char) -> Self {
        if !letter.is_ascii_lowercase() {
            panic!("letter out of range");
        }
        Self((letter as u8) - b'a')
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        (0..ALPHABET as u8).map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = Report;

    fn try_from(value: char) -> Result<Self> {
        if !value.is_ascii_lowercase() {
            bail!("invalid letter range: {value:?}")
        }
        Ok(Self(value as u8 - b'a'))
    }
}

impl Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Letter").field(&char::from(*self)).finish()
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl From<Letter> for char {
    fn from(value: Letter) -> Self {
        (value.0 + b'a') as char
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LetterMap<T>([T; ALPHABET]);

impl<T> IndexMut<Letter> for LetterMap<T> {
    fn index_mut(&mut self, index: Letter) -> &mut Self::Output {
        &mut self.0[index.0 as usize]
    }
}

impl<T> Index<Letter> for LetterMap<T> {
    type Output = T;

    fn index(&self, index: Letter) -> &Self::Output {
        &self.0[index.0 as usize]
    }
}

impl<T> LetterMap<T> {
    pub fn from_fn(mut f: impl FnMut(Letter) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Letter(i as u8))))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Letter, &T)> {
        Letter::all().zip(self.0.iter())
    }
}

/// The character multiset of a word: how many times each letter occurs.
///
/// Two words are anagrams exactly when their frequencies are equal, so the
/// value itself is used as the grouping key. The total is cached because the
/// dominance test uses it as a prefilter.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Frequency {
    counts: LetterMap<u8>,
    total: u32,
}

impl Frequency {
    /// Counts the letters of `word`, rejecting anything outside `a..=z`.
    pub fn encode(word: &str) -> Result<Self> {
        let mut counts = LetterMap::<u8>::default();
        for ch in word.chars() {
            let letter = Letter::try_from(ch).wrap_err_with(|| format!("in word {word:?}"))?;
            let slot = &mut counts[letter];
            *slot = slot
                .checked_add(1)
                .ok_or_else(|| eyre!("too many occurrences of {letter:?} in word {word:?}"))?;
        }
        let total = counts.iter().map(|&count| u32::from(count)).sum();
        Ok(Self { counts, total })
    }

    /// Total number of letters, i.e. the length of the word.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn count(&self, letter: Letter) -> u8 {
        self.counts[letter]
    }

    /// Highest single-letter count.
    pub fn max_count(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or_default()
    }

    /// Letters with a non-zero count.
    pub fn letters(&self) -> impl Iterator<Item = (Letter, u8)> + '_ {
        self.counts
            .entries()
            .filter(|&(_, &count)| count > 0)
            .map(|(letter, &count)| (letter, count))
    }

    /// `true` iff `smaller` can be drawn from `self` with letters left over:
    /// componentwise `<=` and a strictly smaller total. Equal vectors never
    /// dominate each other.
    pub fn dominates(&self, smaller: &Frequency) -> bool {
        if smaller.total >= self.total {
            return false;
        }
        smaller
            .counts
            .iter()
            .zip(self.counts.iter())
            .all(|(small, large)| small <= large)
    }

    pub fn is_dominated_by(&self, larger: &Frequency) -> bool {
        larger.dominates(self)
    }
}

impl TryFrom<&str> for Frequency {
    type Error = Report;

    fn try_from(value: &str) -> Result<Self> {
        Self::encode(value)
    }
}

impl Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.letters().map(|(letter, count)| (char::from(letter), count)))
            .finish()
    }
}

/// Letters of `word` in sorted order; two words are anagrams iff these match.
pub fn sorted_letters(word: &str) -> Result<Vec<Letter>> {
    let mut letters = word
        .chars()
        .map(Letter::try_from)
        .collect::<Result<Vec<_>>>()
        .wrap_err_with(|| format!("in word {word:?}"))?;
    letters.sort_unstable();
    Ok(letters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(word: &str) -> Frequency {
        word.try_into().unwrap()
    }

    #[test]
    fn test_encode() {
        let f = freq("banana");
        assert_eq!(f.total(), 6);
        assert_eq!(f.count(Letter::new('a')), 3);
        assert_eq!(f.count(Letter::new('n')), 2);
        assert_eq!(f.count(Letter::new('b')), 1);
        assert_eq!(f.count(Letter::new('z')), 0);
        assert_eq!(f.max_count(), 3);
        assert_eq!(
            f.letters().collect::<Vec<_>>(),
            [
                (Letter::new('a'), 3),
                (Letter::new('b'), 1),
                (Letter::new('n'), 2)
            ]
        );
        assert_eq!(format!("{f:?}"), "{'a': 3, 'b': 1, 'n': 2}");
    }

    #[test]
    fn test_anagrams_share_a_frequency() {
        assert_eq!(freq("listen"), freq("silent"));
        assert_ne!(freq("listen"), freq("listens"));
        assert_eq!(freq(""), Frequency::default());
    }

    #[test]
    fn test_encode_rejects_out_of_range() {
        for word in ["Cat", "c-t", "caté", "a b"] {
            assert!(Frequency::encode(word).is_err(), "{word} should be rejected");
        }
        assert!(Frequency::encode(&"a".repeat(256)).is_err());
        assert_eq!(Frequency::encode(&"a".repeat(255)).unwrap().max_count(), 255);
    }

    #[test]
    fn test_dominates() {
        assert!(freq("abcd").dominates(&freq("abc")));
        assert!(freq("aaa").dominates(&freq("a")));
        assert!(freq("a").dominates(&freq("")));
        assert!(freq("abc").is_dominated_by(&freq("cabd")));

        // equal vectors
        assert!(!freq("ab").dominates(&freq("ba")));
        assert!(!freq("").dominates(&freq("")));
        // equal sums, different vectors
        assert!(!freq("ab").dominates(&freq("cd")));
        // larger sum but a componentwise violation
        assert!(!freq("abbb").dominates(&freq("aa")));
        assert!(!freq("abc").dominates(&freq("abcd")));
    }

    #[test]
    fn test_sorted_letters() {
        assert_eq!(sorted_letters("cab").unwrap(), sorted_letters("abc").unwrap());
        assert!(sorted_letters("").unwrap().is_empty());
        assert!(sorted_letters("aBc").is_err());
    }

    #[test]
    fn test_letter() {
        assert_eq!(Letter::try_from('q').unwrap(), Letter::new('q'));
        assert!(Letter::try_from('Q').is_err());
        assert_eq!(Letter::new('z').to_string(), "z");
        assert_eq!(Letter::all().count(), ALPHABET);
    }
}
