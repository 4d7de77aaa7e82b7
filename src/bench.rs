use crate::{
    filter::{classes, Variant, VARIANTS},
    words::Frequency,
};
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use std::{
    collections::{HashMap, HashSet},
    fmt::Write,
    time::{Duration, Instant},
};
use tracing::{info, warn};

/// Chance that a generated word is a shuffled copy of an earlier one.
const ANAGRAM_PROBABILITY: f64 = 0.1;
const MAX_WORD_LEN: usize = 8;
/// A variant slower than this on a large input is dropped from larger tiers.
const TOO_SLOW: Duration = Duration::from_secs(30);
const LARGE_INPUT: usize = 1000;

/// One rung of the benchmark ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub size: usize,
    pub iterations: u32,
}

impl Tier {
    pub const DEFAULT: [Tier; 5] = [
        Tier::new(100, 5),
        Tier::new(500, 3),
        Tier::new(1000, 3),
        Tier::new(2000, 2),
        Tier::new(5000, 1),
    ];

    pub const fn new(size: usize, iterations: u32) -> Self {
        Self { size, iterations }
    }

    /// A tier for `size` using the iteration count of the closest default.
    pub fn for_size(size: usize) -> Self {
        let iterations = match size {
            0..=100 => 5,
            101..=1000 => 3,
            1001..=2000 => 2,
            _ => 1,
        };
        Self::new(size, iterations)
    }
}

/// Random words of length `1..=8`, with some anagrams of earlier words mixed in.
pub fn generate(size: usize, rng: &mut impl Rng) -> Vec<String> {
    let mut words: Vec<String> = Vec::with_capacity(size);
    for _ in 0..size {
        let word = if !words.is_empty() && rng.gen_bool(ANAGRAM_PROBABILITY) {
            let mut letters = words[rng.gen_range(0..words.len())].chars().collect_vec();
            letters.shuffle(rng);
            letters.into_iter().collect()
        } else {
            let len = rng.gen_range(1..=MAX_WORD_LEN);
            (0..len).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect()
        };
        words.push(word);
    }
    words
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputStats {
    pub total: usize,
    /// Words whose anagram class has a single member.
    pub unique: usize,
    pub anagram_groups: usize,
    pub anagram_words: usize,
}

impl InputStats {
    pub fn of(words: &[String]) -> Result<Self> {
        let (anagram_groups, anagram_words) = classes(words)?
            .iter()
            .filter(|class| class.members.len() > 1)
            .fold((0, 0), |(groups, count), class| {
                (groups + 1, count + class.members.len())
            });
        Ok(Self {
            total: words.len(),
            unique: words.len() - anagram_words,
            anagram_groups,
            anagram_words,
        })
    }
}

/// Why the words missing from a filter's output were dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Removal {
    pub anagrams: usize,
    pub sub_anagrams: usize,
}

impl Removal {
    pub fn between(input: &[String], output: &[String]) -> Result<Self> {
        let kept: HashSet<&str> = output.iter().map(String::as_str).collect();
        let sizes: HashMap<Frequency, usize> = classes(input)?
            .into_iter()
            .map(|class| (class.frequency, class.members.len()))
            .collect();

        let mut removal = Removal::default();
        for word in input.iter().filter(|word| !kept.contains(word.as_str())) {
            if sizes[&Frequency::encode(word)?] > 1 {
                removal.anagrams += 1;
            } else {
                removal.sub_anagrams += 1;
            }
        }
        Ok(removal)
    }
}

#[derive(Debug, Clone)]
pub struct Timing {
    pub mean: Duration,
    pub survivors: usize,
    pub removal: Removal,
}

#[derive(Debug, Clone)]
pub struct TierResult {
    pub tier: Tier,
    pub stats: InputStats,
    /// One entry per variant; `None` when the variant was skipped.
    pub timings: Vec<(&'static Variant, Option<Timing>)>,
}

impl TierResult {
    pub fn winner(&self) -> Option<&'static Variant> {
        self.timings
            .iter()
            .filter_map(|(variant, timing)| Some((*variant, timing.as_ref()?.mean)))
            .min_by_key(|&(_, mean)| mean)
            .map(|(variant, _)| variant)
    }
}

/// Runs `variant` on `words` `iterations` times, returning the mean duration
/// and the last output.
pub fn measure(
    variant: &Variant,
    words: &[String],
    iterations: u32,
) -> Result<(Duration, Vec<String>)> {
    let iterations = iterations.max(1);
    let mut total = Duration::ZERO;
    let mut output = Vec::new();
    for _ in 0..iterations {
        let start = Instant::now();
        output = variant.filter(words)?;
        total += start.elapsed();
    }
    Ok((total / iterations, output))
}

pub fn run(tiers: &[Tier], rng: &mut impl Rng) -> Result<Vec<TierResult>> {
    let progress = ProgressBar::new((tiers.len() * VARIANTS.len()) as u64)
        .with_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
    let mut skipped = vec![false; VARIANTS.len()];
    let mut results = Vec::with_capacity(tiers.len());

    for &tier in tiers {
        let words = generate(tier.size, rng);
        let stats = InputStats::of(&words)?;
        info!(
            size = tier.size,
            unique = stats.unique,
            anagram_groups = stats.anagram_groups,
            anagram_words = stats.anagram_words,
            "generated input"
        );

        let mut timings = Vec::with_capacity(VARIANTS.len());
        for (variant, skip) in VARIANTS.iter().zip(&mut skipped) {
            progress.set_message(format!("{} on {} words", variant.key, tier.size));
            if *skip {
                timings.push((variant, None));
                progress.inc(1);
                continue;
            }
            let (mean, output) = measure(variant, &words, tier.iterations)?;
            let removal = Removal::between(&words, &output)?;
            info!(
                variant = variant.key,
                size = tier.size,
                time = %format_duration(mean),
                survivors = output.len(),
                removed_anagrams = removal.anagrams,
                removed_sub_anagrams = removal.sub_anagrams,
                "measured"
            );
            if mean > TOO_SLOW && tier.size > LARGE_INPUT {
                warn!(variant = variant.key, "too slow, skipping larger inputs");
                *skip = true;
            }
            timings.push((
                variant,
                Some(Timing {
                    mean,
                    survivors: output.len(),
                    removal,
                }),
            ));
            progress.inc(1);
        }
        results.push(TierResult {
            tier,
            stats,
            timings,
        });
    }
    progress.finish_and_clear();
    Ok(results)
}

pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    if seconds < 0.001 {
        format!("{:.1}µs", seconds * 1_000_000.0)
    } else if seconds < 1.0 {
        format!("{:.1}ms", seconds * 1000.0)
    } else {
        format!("{seconds:.2}s")
    }
}

/// `1234567` as `1,234,567`.
fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let len = digits.len();
    digits
        .chars()
        .enumerate()
        .fold(String::new(), |mut out, (i, digit)| {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(',');
            }
            out.push(digit);
            out
        })
}

fn cell(timing: Option<&Timing>) -> String {
    timing.map_or_else(|| "N/A".to_string(), |t| format_duration(t.mean))
}

/// Markdown table with one row per tier and one column per variant.
pub fn summary(results: &[TierResult]) -> String {
    let mut out = String::new();
    let header = VARIANTS.iter().map(|v| v.label).join(" | ");
    let rule = VARIANTS.iter().map(|v| "-".repeat(v.label.len() + 2)).join("|");
    let _ = writeln!(out, "| Input Size | {header} | Winner |");
    let _ = writeln!(out, "|------------|{rule}|--------|");
    for result in results {
        let cells = result
            .timings
            .iter()
            .map(|(_, timing)| cell(timing.as_ref()))
            .join(" | ");
        let winner = result.winner().map_or("N/A", |v| v.label);
        let _ = writeln!(
            out,
            "| {} | {cells} | {winner} |",
            thousands(result.tier.size)
        );
    }
    out
}

/// Full markdown report: the summary table followed by per-tier details.
pub fn markdown(results: &[TierResult], seed: u64) -> String {
    let mut out = String::from("# Benchmark Results\n\n");
    let _ = writeln!(out, "**Seed:** {seed}\n");
    out.push_str("## Summary\n\n");
    out.push_str(&summary(results));
    out.push_str("\n## Details\n\n");
    for result in results {
        let stats = &result.stats;
        let _ = writeln!(
            out,
            "### {} words ({} unique, {} anagram groups covering {} words)\n",
            thousands(result.tier.size),
            stats.unique,
            stats.anagram_groups,
            stats.anagram_words
        );
        for (variant, timing) in &result.timings {
            match timing {
                Some(t) => {
                    let _ = writeln!(
                        out,
                        "- **{}**: {} ({} words, removed {} anagrams and {} sub-anagrams)",
                        variant.label,
                        format_duration(t.mean),
                        t.survivors,
                        t.removal.anagrams,
                        t.removal.sub_anagrams
                    );
                }
                None => {
                    let _ = writeln!(out, "- **{}**: skipped", variant.label);
                }
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_generate() {
        let mut rng = StdRng::seed_from_u64(7);
        let words = generate(300, &mut rng);
        assert_eq!(words.len(), 300);
        assert!(words
            .iter()
            .all(|w| (1..=MAX_WORD_LEN).contains(&w.len())
                && w.chars().all(|c| c.is_ascii_lowercase())));
        assert_eq!(words, generate(300, &mut StdRng::seed_from_u64(7)));
    }

    #[test]
    fn test_input_stats() {
        let stats = InputStats::of(&owned(&["cat", "act", "tac", "dog", "god", "x"])).unwrap();
        assert_eq!(
            stats,
            InputStats {
                total: 6,
                unique: 1,
                anagram_groups: 2,
                anagram_words: 5,
            }
        );
    }

    #[test]
    fn test_removal() {
        let input = owned(&["a", "ab", "ba", "abc", "abcd"]);
        let removal = Removal::between(&input, &owned(&["abcd"])).unwrap();
        assert_eq!(
            removal,
            Removal {
                anagrams: 2,
                sub_anagrams: 2,
            }
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(12_340)), "12.3µs");
        assert_eq!(format_duration(Duration::from_micros(4_500)), "4.5ms");
        assert_eq!(format_duration(Duration::from_millis(2_346)), "2.35s");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_for_size() {
        assert_eq!(Tier::for_size(100), Tier::DEFAULT[0]);
        assert_eq!(Tier::for_size(2000), Tier::DEFAULT[3]);
        assert_eq!(Tier::for_size(50_000).iterations, 1);
    }

    #[test]
    fn test_run_and_report() {
        let mut rng = StdRng::seed_from_u64(42);
        let results = run(&[Tier::new(60, 1), Tier::new(120, 1)], &mut rng).unwrap();
        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.timings.len(), VARIANTS.len());
            let survivors = result
                .timings
                .iter()
                .map(|(_, t)| t.as_ref().unwrap().survivors)
                .collect_vec();
            assert!(survivors.iter().all_equal(), "{survivors:?}");
            assert!(result.winner().is_some());
        }

        let table = summary(&results);
        assert!(table.starts_with("| Input Size | Brute Force | Pairwise | Indexed | Winner |\n"));
        assert_eq!(table.lines().count(), 4);

        let report = markdown(&results, 42);
        assert!(report.contains("**Seed:** 42"));
        assert!(report.contains("### 120 words"));
    }
}
