//! Test case identifiers: `<PREFIX><0000>.<suffix>`.

use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{GenerateError, Result};

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 6;

/// Suffix characters.
pub const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Draws before a collision is reported as an error.
pub const MAX_SUFFIX_ATTEMPTS: usize = 16;

/// Largest sequence that fits the four-digit field.
pub const MAX_SEQUENCE: u32 = 9999;

/// Source of identifier suffixes.
///
/// Production runs draw from entropy; tests inject a seeded source or a
/// closure so identifiers are reproducible.
pub trait SuffixSource {
    fn next_suffix(&mut self) -> String;
}

impl<F> SuffixSource for F
where
    F: FnMut() -> String,
{
    fn next_suffix(&mut self) -> String {
        self()
    }
}

/// Random lowercase alphanumeric suffixes.
#[derive(Debug, Clone)]
pub struct RandomSuffix<R> {
    rng: R,
}

impl<R: Rng> RandomSuffix<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSuffix<StdRng> {
    /// Reproducible suffixes for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SuffixSource for RandomSuffix<R> {
    fn next_suffix(&mut self) -> String {
        (0..SUFFIX_LEN)
            .map(|_| char::from(SUFFIX_ALPHABET[self.rng.gen_range(0..SUFFIX_ALPHABET.len())]))
            .collect()
    }
}

/// Formats an identifier from its parts. Sequences above [`MAX_SEQUENCE`]
/// widen the numeric field; [`IdGenerator`] never issues one.
pub fn format_id(code_prefix: &str, sequence: u32, suffix: &str) -> String {
    format!("{code_prefix}{sequence:04}.{suffix}")
}

/// Per-group sequence counters.
///
/// A counter exists for every `(provider, payment method, code prefix)` and
/// starts at 1.
#[derive(Debug, Clone, Default)]
pub struct SequenceTracker {
    counters: BTreeMap<(String, String, String), u32>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence number for `code_prefix` within the group.
    pub fn next(&mut self, provider: &str, payment_method: &str, code_prefix: &str) -> u32 {
        let key = (
            provider.to_string(),
            payment_method.to_string(),
            code_prefix.to_string(),
        );
        let entry = self.counters.entry(key).or_insert(0);
        *entry += 1;
        *entry
    }
}

/// Issues identifiers that are unique within one generation run.
pub struct IdGenerator<'a, S: ?Sized> {
    suffixes: &'a mut S,
    issued: HashSet<String>,
}

impl<'a, S: SuffixSource + ?Sized> IdGenerator<'a, S> {
    pub fn new(suffixes: &'a mut S) -> Self {
        Self {
            suffixes,
            issued: HashSet::new(),
        }
    }

    /// A fresh identifier for `code_prefix` and `sequence`.
    ///
    /// The suffix is redrawn while the full identifier collides with one
    /// already issued by this generator. Sequences outside `1..=9999` are
    /// rejected.
    pub fn next_id(&mut self, code_prefix: &str, sequence: u32) -> Result<String> {
        if !(1..=MAX_SEQUENCE).contains(&sequence) {
            return Err(GenerateError::SequenceOutOfRange {
                prefix: code_prefix.to_string(),
                sequence,
            });
        }
        for _ in 0..MAX_SUFFIX_ATTEMPTS {
            let id = format_id(code_prefix, sequence, &self.suffixes.next_suffix());
            if self.issued.insert(id.clone()) {
                return Ok(id);
            }
            tracing::trace!(%id, "identifier collision, drawing a new suffix");
        }
        Err(GenerateError::IdExhausted {
            prefix: code_prefix.to_string(),
            sequence,
            attempts: MAX_SUFFIX_ATTEMPTS,
        })
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_suffix_shape() {
        let mut source = RandomSuffix::seeded(7);
        for _ in 0..50 {
            let suffix = source.next_suffix();
            assert_eq!(suffix.len(), SUFFIX_LEN);
            assert!(suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RandomSuffix::seeded(42);
        let mut b = RandomSuffix::seeded(42);
        assert_eq!(a.next_suffix(), b.next_suffix());
    }

    #[test]
    fn sequences_count_per_group_and_prefix() {
        let mut tracker = SequenceTracker::new();
        assert_eq!(tracker.next("REDE", "CARD", "VRF"), 1);
        assert_eq!(tracker.next("REDE", "CARD", "VRF"), 2);
        assert_eq!(tracker.next("REDE", "CARD", "ATH"), 1);
        assert_eq!(tracker.next("Cielo", "CARD", "VRF"), 1);
        assert_eq!(tracker.next("REDE", "CARD", "VRF"), 3);
    }

    #[test]
    fn collisions_are_redrawn() {
        let mut draws = ["aaaaaa", "aaaaaa", "bbbbbb"].into_iter();
        let mut source = move || draws.next().unwrap_or("zzzzzz").to_string();
        let mut ids = IdGenerator::new(&mut source);
        assert_eq!(ids.next_id("VRF", 1).unwrap(), "VRF0001.aaaaaa");
        assert_eq!(ids.next_id("VRF", 1).unwrap(), "VRF0001.bbbbbb");
        assert_eq!(ids.next_id("VRF", 2).unwrap(), "VRF0002.zzzzzz");
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn constant_suffix_exhausts() {
        let mut source = || "same00".to_string();
        let mut ids = IdGenerator::new(&mut source);
        ids.next_id("MST", 1).unwrap();
        assert!(matches!(
            ids.next_id("MST", 1),
            Err(GenerateError::IdExhausted { attempts: MAX_SUFFIX_ATTEMPTS, .. })
        ));
    }

    #[test]
    fn sequence_stays_four_digits() {
        let mut source = || "abc123".to_string();
        let mut ids = IdGenerator::new(&mut source);
        assert_eq!(ids.next_id("VRF", MAX_SEQUENCE).unwrap(), "VRF9999.abc123");
        assert!(matches!(
            ids.next_id("VRF", MAX_SEQUENCE + 1),
            Err(GenerateError::SequenceOutOfRange { sequence: 10000, .. })
        ));
        assert!(matches!(
            ids.next_id("VRF", 0),
            Err(GenerateError::SequenceOutOfRange { sequence: 0, .. })
        ));
        assert_eq!(ids.issued(), 1);
    }
}
