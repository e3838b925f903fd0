//! Compiled-regex cache
//!
//! Regex rule values are typically static configuration, so patterns repeat
//! across evaluations. Compiled regexes are cached process-wide, keyed by
//! pattern string. Caching changes performance only; verdicts are identical
//! with a cold cache.

use crate::error::{Result, RuleError};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;

/// Global pattern cache with fast hashing (ahash)
static REGEX_CACHE: Lazy<RwLock<AHashMap<String, Regex>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(256);
    RwLock::new(map)
});

/// Get or compile a regex pattern, using the cache for repeated patterns
#[inline]
pub(crate) fn get_or_compile(pattern: &str) -> Result<Regex> {
    // Fast path: check read lock first
    {
        let cache = REGEX_CACHE.read();
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.clone());
        }
    }

    // Slow path: compile and cache
    let regex = Regex::new(pattern).map_err(|source| RuleError::RegexCompile {
        pattern: pattern.to_string(),
        source,
    })?;

    {
        let mut cache = REGEX_CACHE.write();
        cache.insert(pattern.to_string(), regex.clone());
    }

    Ok(regex)
}

/// Clear the regex cache (useful for testing and benchmarks)
pub fn clear_cache() {
    let mut cache = REGEX_CACHE.write();
    cache.clear();
}

/// Get cache statistics
pub fn cache_size() -> usize {
    let cache = REGEX_CACHE.read();
    cache.len()
}
