//! Cache of synthesized tracked types.
//!
//! The [`ProxyRegistry`] memoizes one [`ProxyType`] per entity type, keyed by the entity's
//! `TypeId`. Entries are populated lazily and never evicted.
//!
//! # Thread Safety
//!
//! Lookups and insertions go through a concurrent hash map (`DashMap`) and never hold a lock
//! while synthesizing. Two threads missing on the same entity may both build a candidate; the
//! first insertion wins and every caller receives the stored one. All candidates for the same
//! entity are equal, so losing the race only costs the duplicate work, which is visible through
//! [`ProxyRegistry::synthesis_count`].
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use chic_tracking::{entity, tracking::ProxyRegistry};
//!
//! entity! {
//!     #[derive(Debug, Default)]
//!     pub class Note {
//!         "Text" => text: Option<String> [VIRTUAL],
//!     }
//! }
//!
//! let registry = ProxyRegistry::new();
//! let first = registry.get_or_synthesize::<Note>()?;
//! let second = registry.get_or_synthesize::<Note>()?;
//!
//! assert!(Arc::ptr_eq(&first, &second));
//! assert_eq!(registry.synthesis_count(), 1);
//! # Ok::<(), chic_tracking::Error>(())
//! ```

use std::{
    any::TypeId,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, OnceLock,
    },
};

use dashmap::DashMap;
use log::{debug, trace};

use crate::{
    entity::Entity,
    tracking::{ProxyBuilder, ProxyTypeRc, SynthesisConfig},
    Result,
};

static GLOBAL: OnceLock<Arc<ProxyRegistry>> = OnceLock::new();

/// Process-wide memoization of tracked types
pub struct ProxyRegistry {
    /// Synthesized types by entity `TypeId`
    types: DashMap<TypeId, ProxyTypeRc>,
    /// Checks applied to every synthesis
    config: SynthesisConfig,
    /// Number of completed synthesis runs, including those that lost a race
    synthesized: AtomicUsize,
}

impl ProxyRegistry {
    /// Create an empty registry with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SynthesisConfig::default())
    }

    /// Create an empty registry with a custom configuration
    #[must_use]
    pub fn with_config(config: SynthesisConfig) -> Self {
        ProxyRegistry {
            types: DashMap::new(),
            config,
            synthesized: AtomicUsize::new(0),
        }
    }

    /// The registry shared by the whole process, created on first use
    pub fn global() -> Arc<ProxyRegistry> {
        GLOBAL
            .get_or_init(|| Arc::new(ProxyRegistry::new()))
            .clone()
    }

    /// The configuration applied to synthesis
    #[must_use]
    pub fn config(&self) -> SynthesisConfig {
        self.config
    }

    /// Return the tracked type of `T`, synthesizing it on a cache miss
    ///
    /// # Errors
    /// Returns [`crate::Error::Synthesis`] if `T` can not be wrapped. Failed syntheses are not
    /// cached; a later call tries again.
    pub fn get_or_synthesize<T: Entity + Default>(&self) -> Result<ProxyTypeRc> {
        let key = TypeId::of::<T>();

        if let Some(existing) = self.get_by_id(key) {
            trace!("Cache hit for {}", existing.entity_name());
            return Ok(existing);
        }

        let candidate = Arc::new(
            ProxyBuilder::<T>::new()
                .with_config(self.config)
                .build()?,
        );
        self.synthesized.fetch_add(1, Ordering::Relaxed);

        let stored = self
            .types
            .entry(key)
            .or_insert_with(|| candidate.clone())
            .value()
            .clone();

        if !Arc::ptr_eq(&stored, &candidate) {
            debug!(
                "Discarded duplicate synthesis of '{}', another thread cached it first",
                stored.name()
            );
        }

        Ok(stored)
    }

    /// The cached tracked type of `T`, if it was synthesized already
    #[must_use]
    pub fn get<T: Entity>(&self) -> Option<ProxyTypeRc> {
        self.get_by_id(TypeId::of::<T>())
    }

    fn get_by_id(&self, key: TypeId) -> Option<ProxyTypeRc> {
        self.types.get(&key).map(|entry| entry.value().clone())
    }

    /// Returns true if the tracked type of `T` is cached
    #[must_use]
    pub fn contains<T: Entity>(&self) -> bool {
        self.types.contains_key(&TypeId::of::<T>())
    }

    /// Number of cached tracked types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of synthesis runs performed so far, duplicates included
    #[must_use]
    pub fn synthesis_count(&self) -> usize {
        self.synthesized.load(Ordering::Relaxed)
    }
}

impl Default for ProxyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Barrier, thread};

    use super::*;
    use crate::{
        test::{ITestType, SealedType, TestType, Unreadable},
        Error,
    };

    #[test]
    fn test_cache_hit_returns_same_type() {
        let registry = ProxyRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get::<TestType>().is_none());

        let first = registry.get_or_synthesize::<TestType>().unwrap();
        let second = registry.get_or_synthesize::<TestType>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.contains::<TestType>());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.synthesis_count(), 1);
    }

    #[test]
    fn test_distinct_entities_distinct_types() {
        let registry = ProxyRegistry::new();
        let class = registry.get_or_synthesize::<TestType>().unwrap();
        let interface = registry.get_or_synthesize::<ITestType>().unwrap();

        assert_ne!(*class, *interface);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failure_not_cached() {
        let registry = ProxyRegistry::new();

        assert!(registry.get_or_synthesize::<SealedType>().is_err());
        assert!(registry.get_or_synthesize::<SealedType>().is_err());
        assert!(!registry.contains::<SealedType>());
        assert_eq!(registry.synthesis_count(), 0);
    }

    #[test]
    fn test_config_applies() {
        let registry = ProxyRegistry::with_config(SynthesisConfig::disabled());
        assert_eq!(registry.config(), SynthesisConfig::disabled());
        assert!(registry.get_or_synthesize::<Unreadable>().is_ok());

        assert!(matches!(
            registry.get_or_synthesize::<SealedType>(),
            Err(Error::Synthesis { .. })
        ));
        assert!(!registry.contains::<SealedType>());
    }

    #[test]
    fn test_concurrent_miss() {
        const THREADS: usize = 8;

        let registry = Arc::new(ProxyRegistry::new());
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    registry.get_or_synthesize::<TestType>().unwrap()
                })
            })
            .collect();

        let results: Vec<ProxyTypeRc> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert!(results.iter().all(|proxy| Arc::ptr_eq(proxy, &results[0])));
        assert_eq!(registry.len(), 1);
        assert!(registry.synthesis_count() >= 1);
        assert!(registry.synthesis_count() <= THREADS);
    }

    #[test]
    fn test_global_is_shared() {
        let first = ProxyRegistry::global();
        let second = ProxyRegistry::global();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
