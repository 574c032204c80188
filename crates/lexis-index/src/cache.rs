//! Compute-once cache of text indexes, keyed by model identity.
//!
//! The cache is an explicit value owned by whatever represents a model
//! session, not process-wide state. Each entry pairs a weak reference to its
//! model with a [`OnceLock`] slot:
//!
//! - The map lock is held only to find or create a slot, never while
//!   indexing, so different models are indexed in parallel.
//! - Concurrent first requests for the same model share one slot; exactly
//!   one of them runs the traversal and the others block until it is done.
//! - Entries whose model has been dropped are pruned when the next new
//!   model is cached; lookups of cached models never scan the map.
//! - Failures are cached like successes, since indexing is deterministic.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak,
        atomic::{AtomicUsize, Ordering},
    },
};

use log::debug;

use lexis_core::model::{Model, ModelId};

use crate::{config::IndexConfig, error::Result, index::TextIndex, instance::TextInstance};

type Slot = Arc<OnceLock<Result<Arc<TextIndex>>>>;

#[derive(Debug)]
struct Entry {
    model: Weak<Model>,
    slot: Slot,
}

/// Memoizes one [`TextIndex`] per live model.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use lexis_core::{model::Model, shape::{ShapeBuilder, ShapeType}, shape_id::ShapeId};
/// use lexis_index::TextIndexCache;
///
/// let model = Arc::new(
///     Model::builder()
///         .shape(ShapeBuilder::new(ShapeType::Service, ShapeId::new("example.weather", "Weather")))
///         .build()
///         .unwrap(),
/// );
///
/// let cache = TextIndexCache::new();
/// let first = cache.get_or_build(&model).unwrap();
/// let second = cache.get_or_build(&model).unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(cache.builds(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TextIndexCache {
    config: Option<IndexConfig>,
    entries: Mutex<HashMap<ModelId, Entry>>,
    builds: AtomicUsize,
}

impl TextIndexCache {
    /// Creates a cache that reads each model's configuration from its
    /// metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache that indexes every model with `config`.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Returns the index of `model`, running the traversal on first request.
    ///
    /// # Errors
    ///
    /// Returns the [`IndexError`](crate::IndexError) of the first traversal
    /// of this model, on that request and every later one.
    pub fn get_or_build(&self, model: &Arc<Model>) -> Result<Arc<TextIndex>> {
        let slot = self.slot(model);
        if slot.get().is_some() {
            debug!(model:% = model.id(); "Text index cache hit");
        }

        slot.get_or_init(|| {
            debug!(model:% = model.id(); "Text index cache miss");
            self.builds.fetch_add(1, Ordering::SeqCst);
            self.index(model).map(Arc::new)
        })
        .clone()
    }

    /// Visits every text instance of `model` in index order.
    ///
    /// # Errors
    ///
    /// Returns the error of [`get_or_build`](Self::get_or_build); `visit`
    /// is not called in that case.
    pub fn for_each<F>(&self, model: &Arc<Model>, mut visit: F) -> Result<()>
    where
        F: FnMut(&TextInstance),
    {
        let index = self.get_or_build(model)?;
        for instance in index.iter() {
            visit(instance);
        }
        Ok(())
    }

    /// Drops the cached index of `model`, if any.
    ///
    /// Returns `true` if an entry was removed.
    pub fn evict(&self, model: &Model) -> bool {
        let removed = self.entries().remove(&model.id()).is_some();
        if removed {
            debug!(model:% = model.id(); "Text index evicted");
        }
        removed
    }

    /// Number of models with a cache entry, live or not yet pruned.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Number of traversals this cache has run.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    fn index(&self, model: &Model) -> Result<TextIndex> {
        match &self.config {
            Some(config) => TextIndex::build(model, config),
            None => TextIndex::of(model),
        }
    }

    fn slot(&self, model: &Arc<Model>) -> Slot {
        let mut entries = self.entries();
        if let Some(entry) = entries.get(&model.id()) {
            return Arc::clone(&entry.slot);
        }

        // Dead entries are pruned only when the map grows.
        let before = entries.len();
        entries.retain(|_, entry| entry.model.strong_count() > 0);
        let pruned = before - entries.len();
        if pruned > 0 {
            debug!(pruned = pruned; "Pruned text indexes of dropped models");
        }

        let slot = Slot::default();
        entries.insert(
            model.id(),
            Entry {
                model: Arc::downgrade(model),
                slot: Arc::clone(&slot),
            },
        );
        slot
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ModelId, Entry>> {
        // Entries stay consistent even if a holder panicked.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use lexis_core::{
        node::Node,
        shape::{ShapeBuilder, ShapeType},
        shape_id::ShapeId,
    };

    use super::*;
    use crate::{
        config::INCLUDE_BUILTINS_METADATA_KEY, error::IndexError, instance::TextLocation,
    };

    fn model(name: &str) -> Arc<Model> {
        Arc::new(
            Model::builder()
                .with_prelude()
                .shape(ShapeBuilder::new(
                    ShapeType::Service,
                    ShapeId::new("example.cache", name),
                ))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_second_request_hits_cache() {
        let cache = TextIndexCache::new();
        let model = model("Weather");

        let first = cache.get_or_build(&model).unwrap();
        let second = cache.get_or_build(&model).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.builds(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_models_cached_separately() {
        let cache = TextIndexCache::new();
        let weather = model("Weather");
        let traffic = model("Traffic");

        let a = cache.get_or_build(&weather).unwrap();
        let b = cache.get_or_build(&traffic).unwrap();

        assert_ne!(a, b);
        assert_eq!(cache.builds(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_dropped_models_are_pruned() {
        let cache = TextIndexCache::new();
        let kept = model("Weather");
        {
            let dropped = model("Traffic");
            cache.get_or_build(&dropped).unwrap();
        }
        assert_eq!(cache.len(), 1);

        cache.get_or_build(&kept).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_hits_leave_dead_entries_until_next_miss() {
        let cache = TextIndexCache::new();
        let kept = model("Weather");
        cache.get_or_build(&kept).unwrap();
        {
            let dropped = model("Traffic");
            cache.get_or_build(&dropped).unwrap();
        }

        cache.get_or_build(&kept).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.builds(), 2);

        let fresh = model("Tides");
        cache.get_or_build(&fresh).unwrap();
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.builds(), 3);
    }

    #[test]
    fn test_evict_forces_rebuild() {
        let cache = TextIndexCache::new();
        let model = model("Weather");

        cache.get_or_build(&model).unwrap();
        assert!(cache.evict(&model));
        assert!(!cache.evict(&model));
        assert!(cache.is_empty());

        cache.get_or_build(&model).unwrap();
        assert_eq!(cache.builds(), 2);
    }

    #[test]
    fn test_errors_are_cached() {
        let cache = TextIndexCache::new();
        let model = Arc::new(
            Model::builder()
                .metadata(INCLUDE_BUILTINS_METADATA_KEY, Node::from("yes"))
                .build()
                .unwrap(),
        );

        let first = cache.get_or_build(&model).unwrap_err();
        let second = cache.get_or_build(&model).unwrap_err();

        assert!(matches!(first, IndexError::InvalidMetadata { .. }));
        assert_eq!(first, second);
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn test_with_config_ignores_metadata() {
        let cache = TextIndexCache::with_config(IndexConfig::new(true));
        let model = model("Weather");

        let index = cache.get_or_build(&model).unwrap();
        assert_eq!(index.at(TextLocation::Namespace).count(), 2);
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let cache = TextIndexCache::new();
        let model = model("Weather");

        let mut texts = Vec::new();
        cache
            .for_each(&model, |instance| texts.push(instance.text().to_string()))
            .unwrap();

        assert_eq!(texts, ["Weather", "example.cache"]);
        assert_eq!(cache.builds(), 1);
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let cache = TextIndexCache::new();
        let model = model("Weather");

        let indexes: Vec<Arc<TextIndex>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_or_build(&model).unwrap()))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(cache.builds(), 1);
        assert!(indexes.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }
}
