use crate::{
    cases::TestCase,
    filter::{Variant, VARIANTS},
};
use color_eyre::Result;
use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rayon::prelude::*;
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail { actual: Vec<String> },
    Error(String),
}

#[derive(Debug)]
pub struct CaseResult<'a> {
    pub case: &'a TestCase,
    pub outcome: Outcome,
}

/// Results of one variant over a list of cases, in case order.
#[derive(Debug)]
pub struct Report<'a> {
    pub variant: &'static Variant,
    pub results: Vec<CaseResult<'a>>,
}

impl Report<'_> {
    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == Outcome::Pass)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution: {}", self.variant.name)?;
        writeln!(f, "Complexity: {}", self.variant.complexity)?;
        writeln!(f)?;
        writeln!(f, "Running {} tests...", self.results.len())?;
        writeln!(f)?;
        for CaseResult { case, outcome } in &self.results {
            let mark = if *outcome == Outcome::Pass { '✓' } else { '✗' };
            writeln!(f, "{mark} Test {}: {}", case.id, case.category)?;
            match outcome {
                Outcome::Pass => {}
                Outcome::Fail { actual } => {
                    writeln!(f, "  Input: {:?}", case.input)?;
                    writeln!(f, "  Expected: {:?}", case.expected)?;
                    writeln!(f, "  Got: {actual:?}")?;
                }
                Outcome::Error(message) => {
                    writeln!(f, "  Input: {:?}", case.input)?;
                    writeln!(f, "  Error: {message}")?;
                }
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(40))?;
        write!(
            f,
            "Results: {} passed, {} failed",
            self.passed(),
            self.failed()
        )
    }
}

/// Order-insensitive comparison of two word lists.
pub fn same_words(actual: &[String], expected: &[String]) -> bool {
    actual.len() == expected.len() && actual.iter().sorted().eq(expected.iter().sorted())
}

pub fn evaluate(variant: &Variant, case: &TestCase) -> Outcome {
    match variant.filter(&case.input) {
        Ok(actual) if same_words(&actual, &case.expected) => Outcome::Pass,
        Ok(actual) => Outcome::Fail { actual },
        Err(err) => Outcome::Error(format!("{err:#}")),
    }
}

/// Evaluates every case against `variant`. Cases are independent and run in
/// parallel.
pub fn run<'a>(variant: &'static Variant, cases: &'a [TestCase]) -> Report<'a> {
    let results = cases
        .par_iter()
        .map(|case| CaseResult {
            case,
            outcome: evaluate(variant, case),
        })
        .collect();
    Report { variant, results }
}

/// Sorted output of every variant on the same input.
#[derive(Debug)]
pub struct CrossCheck {
    pub outputs: Vec<(&'static Variant, Vec<String>)>,
}

impl CrossCheck {
    pub fn agrees(&self) -> bool {
        self.outputs.iter().map(|(_, output)| output).all_equal()
    }
}

impl Display for CrossCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .outputs
            .iter()
            .map(|(variant, output)| format!("  {}: {output:?}", variant.key))
            .join("\n");
        f.write_str(&lines)
    }
}

pub fn cross_check(words: &[String]) -> Result<CrossCheck> {
    let outputs = VARIANTS
        .iter()
        .map(|variant| {
            variant
                .filter(words)
                .map(|output| (variant, output.into_iter().sorted().collect_vec()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CrossCheck { outputs })
}

/// Cross-checks the input of every case, returning the cases on which the
/// variants disagree or fail.
pub fn disagreements(cases: &[TestCase]) -> Vec<(&TestCase, String)> {
    cases
        .par_iter()
        .progress_count(cases.len() as u64)
        .filter_map(|case| match cross_check(&case.input) {
            Ok(check) if check.agrees() => None,
            Ok(check) => Some((case, check.to_string())),
            Err(err) => Some((case, format!("  {err:#}"))),
        })
        .collect()
}
