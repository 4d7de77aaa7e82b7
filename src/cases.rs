use color_eyre::{eyre::WrapErr, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TestCase {
    pub id: u32,
    pub category: String,
    pub input: Vec<String>,
    pub expected: Vec<String>,
    /// Informational only.
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TestData {
    pub test_cases: Vec<TestCase>,
}

/// Where to look for the case file when none is given, relative to the
/// working directory.
const SEARCH_PATHS: [&str; 3] = [
    "testcases/cases.json",
    "../testcases/cases.json",
    "../../testcases/cases.json",
];

pub fn read(path: &Path) -> Result<Vec<TestCase>> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read {}", path.display()))?;
    let data: TestData = serde_json::from_str(&content)
        .wrap_err_with(|| format!("could not parse {}", path.display()))?;
    Ok(data.test_cases)
}

/// Loads cases from `path`, or from the first existing search path. Any
/// failure falls back to [`embedded`].
pub fn load(path: Option<&Path>) -> Vec<TestCase> {
    let Some(path) = path.map(Path::to_path_buf).or_else(locate) else {
        warn!("no test case file found, using embedded cases");
        return embedded();
    };
    match read(&path) {
        Ok(cases) => {
            info!(path = %path.display(), count = cases.len(), "loaded test cases");
            cases
        }
        Err(err) => {
            warn!("{err:#}, using embedded cases");
            embedded()
        }
    }
}

fn locate() -> Option<PathBuf> {
    SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

fn case(id: u32, input: &[&str], expected: &[&str], explanation: &str) -> TestCase {
    let owned = |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };
    TestCase {
        id,
        category: "basic".to_string(),
        input: owned(input),
        expected: owned(expected),
        explanation: explanation.to_string(),
    }
}

pub fn embedded() -> Vec<TestCase> {
    vec![
        case(
            1,
            &["a", "ab", "ba", "abc", "abcd"],
            &["abcd"],
            "everything else fits inside abcd",
        ),
        case(
            2,
            &["abc", "def", "ghi"],
            &["abc", "def", "ghi"],
            "disjoint letters",
        ),
        case(3, &["a", "aa", "aaa"], &["aaa"], "chain of sub-anagrams"),
        case(4, &["cat", "act", "dog"], &["dog"], "cat and act are anagrams"),
        case(
            5,
            &["listen", "silent", "enlist"],
            &[],
            "three-way anagram class",
        ),
        case(
            6,
            &["ab", "ba", "abc"],
            &["abc"],
            "an anagram pair that is also covered by a longer word",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded() {
        let cases = embedded();
        assert_eq!(cases.len(), 6);
        assert!(cases.iter().map(|c| c.id).eq(1..=6));
        assert_eq!(cases[5].input, ["ab", "ba", "abc"]);
        assert!(cases[4].expected.is_empty());
    }

    #[test]
    fn test_read() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{"test_cases": [
                {{"id": 9, "category": "edge", "input": ["x", "xy"], "expected": ["xy"], "explanation": "x fits"}},
                {{"id": 10, "category": "edge", "input": [], "expected": []}}
            ]}}"#
        )?;
        let cases = read(file.path())?;
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].id, 9);
        assert_eq!(cases[0].expected, ["xy"]);
        assert_eq!(cases[1].explanation, "");
        assert_eq!(load(Some(file.path())), cases);
        Ok(())
    }

    #[test]
    fn test_load_falls_back() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "{{ not json")?;
        assert!(read(file.path()).is_err());
        assert_eq!(load(Some(file.path())), embedded());

        let dir = tempfile::tempdir()?;
        assert_eq!(load(Some(dir.path().join("missing.json").as_path())), embedded());
        Ok(())
    }
}
