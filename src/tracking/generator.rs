//! Entry point for obtaining tracked types and instances.

use std::sync::Arc;

use log::debug;

use crate::{
    entity::Entity,
    tracking::{ProxyRegistry, ProxyTypeRc, Tracked},
    Result,
};

/// Creates tracked types and instances backed by a [`ProxyRegistry`]
///
/// [`ProxyGenerator::new`] uses the process-wide registry. Cloning a generator is cheap; all
/// clones share the same cache.
///
/// # Examples
///
/// ```rust
/// use chic_tracking::{entity, ChangeTracking, ProxyGenerator};
///
/// entity! {
///     #[derive(Debug, Default, Clone)]
///     pub class Customer {
///         "Name" => name: Option<String> [VIRTUAL],
///         "Visits" => visits: i32 [VIRTUAL],
///     }
/// }
///
/// let generator = ProxyGenerator::new();
/// let plain = Customer { name: Some("Ada".into()), visits: 3 };
///
/// let mut customer = generator.project(&plain)?;
/// assert!(!customer.is_modified());
///
/// customer.set("Visits", 4)?;
/// assert!(customer.is_modified());
/// assert_eq!(customer.visits, 4);
/// # Ok::<(), chic_tracking::Error>(())
/// ```
#[derive(Clone)]
pub struct ProxyGenerator {
    registry: Arc<ProxyRegistry>,
}

impl ProxyGenerator {
    /// A generator over the process-wide registry
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ProxyRegistry::global())
    }

    /// A generator over a specific registry
    #[must_use]
    pub fn with_registry(registry: Arc<ProxyRegistry>) -> Self {
        ProxyGenerator { registry }
    }

    /// The registry this generator caches into
    #[must_use]
    pub fn registry(&self) -> &Arc<ProxyRegistry> {
        &self.registry
    }

    /// The tracked type of `T`, synthesized on first request
    ///
    /// # Errors
    /// Returns [`crate::Error::Synthesis`] if `T` can not be wrapped.
    pub fn tracked_type<T: Entity + Default>(&self) -> Result<ProxyTypeRc> {
        self.registry.get_or_synthesize::<T>()
    }

    /// A default-initialized tracked instance of `T`
    ///
    /// # Errors
    /// Returns [`crate::Error::Synthesis`] if `T` can not be wrapped.
    pub fn create_instance<T: Entity + Default>(&self) -> Result<Tracked<T>> {
        let proxy = self.tracked_type::<T>()?;
        Ok(Tracked::new(proxy, T::default()))
    }

    /// A tracked instance of `T` seeded from `source`
    ///
    /// Every declared member of `source` is copied through the instrumented setters, so each
    /// copied value becomes that member's baseline and the result is not modified.
    ///
    /// # Errors
    /// Returns [`crate::Error::Synthesis`] if `T` can not be wrapped, or
    /// [`crate::Error::Projection`] if a member could not be copied. The partially projected
    /// instance is dropped; use [`Tracked::project_from`] to keep it.
    pub fn project<T: Entity + Default>(&self, source: &T) -> Result<Tracked<T>> {
        let mut tracked = self.create_instance::<T>()?;
        tracked.project_from(source)?;

        debug!(
            "Projected {} into '{}'",
            tracked.proxy_type().entity_name(),
            tracked.proxy_type().name()
        );
        Ok(tracked)
    }
}

impl Default for ProxyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
