//! Filters a word list down to the words whose letter multiset is strictly
//! maximal: no other word is an anagram of it, and no other word contains all
//! of its letters with some to spare.
//!
//! Three interchangeable implementations are provided, see [`filter::VARIANTS`].

pub mod bench;
pub mod brute_force;
pub mod cases;
pub mod driver;
pub mod filter;
pub mod indexed;
pub mod pairwise;
pub mod words;
