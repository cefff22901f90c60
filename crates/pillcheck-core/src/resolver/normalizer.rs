//! Drug normalizer: TTL-cached front for the vocabulary oracle.
//!
//! Every operation consults its cache (keyed by lowercased input) before
//! calling the oracle. Explicit "not found" answers are cached too, so
//! repeated misses do not hammer the service. Transport errors propagate to
//! the caller and are never cached.

use std::sync::Mutex;
use std::time::Duration;

use tracing::trace;

use crate::vocabulary::{DrugCandidate, DrugDetails, OracleResult, VocabularyOracle};

use super::cache::TtlCache;

/// Normalizer tunables.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// How long cached answers stay valid
    pub ttl: Duration,
    /// Maximum candidates returned by fuzzy search
    pub max_candidates: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_candidates: 5,
        }
    }
}

/// Cached wrapper around a [`VocabularyOracle`].
///
/// Each cache map sits behind its own mutex; locks are never held across an
/// oracle call. Two concurrent callers may race to populate the same key —
/// last write wins, which is fine because answers are idempotent per key.
pub struct DrugNormalizer<'a> {
    oracle: &'a dyn VocabularyOracle,
    config: NormalizerConfig,
    canonical_cache: Mutex<TtlCache<String, Option<String>>>,
    search_cache: Mutex<TtlCache<String, Vec<DrugCandidate>>>,
    details_cache: Mutex<TtlCache<String, Option<DrugDetails>>>,
}

impl<'a> DrugNormalizer<'a> {
    /// Create a normalizer with default config.
    pub fn new(oracle: &'a dyn VocabularyOracle) -> Self {
        Self::with_config(oracle, NormalizerConfig::default())
    }

    pub fn with_config(oracle: &'a dyn VocabularyOracle, config: NormalizerConfig) -> Self {
        Self {
            oracle,
            config,
            canonical_cache: Mutex::new(TtlCache::new()),
            search_cache: Mutex::new(TtlCache::new()),
            details_cache: Mutex::new(TtlCache::new()),
        }
    }

    /// Resolve an exact drug name to its canonical id.
    pub fn resolve_canonical(&self, name: &str) -> OracleResult<Option<String>> {
        let key = name.to_lowercase();
        if let Some(hit) = lock(&self.canonical_cache).get(&key) {
            trace!(name = %key, "canonical cache hit");
            return Ok(hit);
        }

        let result = self.oracle.lookup_canonical(name)?;
        lock(&self.canonical_cache).insert(key, result.clone(), self.config.ttl);
        Ok(result)
    }

    /// Fuzzy candidates for a term, best match first, length bounded by
    /// [`NormalizerConfig::max_candidates`].
    pub fn fuzzy_candidates(&self, term: &str) -> OracleResult<Vec<DrugCandidate>> {
        let key = term.to_lowercase();
        if let Some(hit) = lock(&self.search_cache).get(&key) {
            trace!(term = %key, "search cache hit");
            return Ok(hit);
        }

        let result = self.oracle.approximate_search(term, self.config.max_candidates)?;
        lock(&self.search_cache).insert(key, result.clone(), self.config.ttl);
        Ok(result)
    }

    /// Details for a canonical id.
    pub fn details_for(&self, canonical_id: &str) -> OracleResult<Option<DrugDetails>> {
        let key = canonical_id.to_lowercase();
        if let Some(hit) = lock(&self.details_cache).get(&key) {
            trace!(id = %key, "details cache hit");
            return Ok(hit);
        }

        let result = self.oracle.fetch_details(canonical_id)?;
        lock(&self.details_cache).insert(key, result.clone(), self.config.ttl);
        Ok(result)
    }
}

/// Lock a cache map, recovering from poisoning (the cache holds plain data,
/// so a panicked writer cannot leave it logically inconsistent).
fn lock<K, V>(cache: &Mutex<TtlCache<K, V>>) -> std::sync::MutexGuard<'_, TtlCache<K, V>> {
    cache.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::vocabulary::OracleError;

    /// Oracle that counts calls and can be switched to failing.
    struct CountingOracle {
        calls: Cell<usize>,
        failing: bool,
    }

    impl CountingOracle {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                failing: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Cell::new(0),
                failing: true,
            }
        }

        fn bump(&self) -> OracleResult<()> {
            self.calls.set(self.calls.get() + 1);
            if self.failing {
                Err(OracleError::Unavailable("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    impl VocabularyOracle for CountingOracle {
        fn lookup_canonical(&self, name: &str) -> OracleResult<Option<String>> {
            self.bump()?;
            Ok(match name.to_lowercase().as_str() {
                "ibuprofen" => Some("5640".into()),
                _ => None,
            })
        }

        fn approximate_search(&self, term: &str, _max: usize) -> OracleResult<Vec<DrugCandidate>> {
            self.bump()?;
            Ok(if term.to_lowercase().starts_with("ibu") {
                vec![DrugCandidate {
                    canonical_id: "5640".into(),
                    display_name: "Ibuprofen".into(),
                }]
            } else {
                vec![]
            })
        }

        fn fetch_details(&self, canonical_id: &str) -> OracleResult<Option<DrugDetails>> {
            self.bump()?;
            Ok((canonical_id == "5640").then(|| DrugDetails {
                display_name: "Ibuprofen".into(),
                attributes: Default::default(),
            }))
        }
    }

    #[test]
    fn test_cache_hit_skips_oracle() {
        let oracle = CountingOracle::new();
        let normalizer = DrugNormalizer::new(&oracle);

        assert_eq!(
            normalizer.resolve_canonical("Ibuprofen").unwrap(),
            Some("5640".to_string())
        );
        // Case-folded key: the second spelling hits the cache
        assert_eq!(
            normalizer.resolve_canonical("IBUPROFEN").unwrap(),
            Some("5640".to_string())
        );
        assert_eq!(oracle.calls.get(), 1);
    }

    #[test]
    fn test_not_found_is_cached() {
        let oracle = CountingOracle::new();
        let normalizer = DrugNormalizer::new(&oracle);

        assert_eq!(normalizer.resolve_canonical("nosuchdrug").unwrap(), None);
        assert_eq!(normalizer.resolve_canonical("nosuchdrug").unwrap(), None);
        assert_eq!(oracle.calls.get(), 1);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let oracle = CountingOracle::new();
        let normalizer = DrugNormalizer::with_config(
            &oracle,
            NormalizerConfig {
                ttl: Duration::ZERO,
                max_candidates: 5,
            },
        );

        normalizer.resolve_canonical("ibuprofen").unwrap();
        normalizer.resolve_canonical("ibuprofen").unwrap();
        assert_eq!(oracle.calls.get(), 2);
    }

    #[test]
    fn test_transport_error_propagates_and_is_not_cached() {
        let oracle = CountingOracle::failing();
        let normalizer = DrugNormalizer::new(&oracle);

        assert!(matches!(
            normalizer.resolve_canonical("ibuprofen"),
            Err(OracleError::Unavailable(_))
        ));
        assert!(normalizer.resolve_canonical("ibuprofen").is_err());
        // Both attempts reached the oracle
        assert_eq!(oracle.calls.get(), 2);
    }

    #[test]
    fn test_each_operation_has_its_own_cache() {
        let oracle = CountingOracle::new();
        let normalizer = DrugNormalizer::new(&oracle);

        normalizer.resolve_canonical("ibuprofen").unwrap();
        normalizer.fuzzy_candidates("ibuprofen").unwrap();
        normalizer.details_for("5640").unwrap();
        // Three distinct operations, three oracle calls despite shared input
        assert_eq!(oracle.calls.get(), 3);
    }

    #[test]
    fn test_fuzzy_candidates_cached() {
        let oracle = CountingOracle::new();
        let normalizer = DrugNormalizer::new(&oracle);

        let first = normalizer.fuzzy_candidates("ibuprofn").unwrap();
        let second = normalizer.fuzzy_candidates("ibuprofn").unwrap();
        assert_eq!(first, second);
        assert_eq!(oracle.calls.get(), 1);
    }
}
