//! Builder for tracked types.
//!
//! [`ProxyBuilder`] turns an entity type into a [`ProxyType`]. It first checks that the entity's
//! shape can be structurally satisfied, then selects the trackable members and instruments each
//! of them with the equality mode of its declared type.
//!
//! # Example
//!
//! ```rust
//! use chic_tracking::{entity, tracking::{ProxyBuilder, SynthesisConfig}};
//!
//! entity! {
//!     #[derive(Debug, Default)]
//!     pub class Order {
//!         "Reference" => reference: Option<String> [VIRTUAL],
//!         "Created" => created: i64 [],
//!     }
//! }
//!
//! let proxy = ProxyBuilder::<Order>::new()
//!     .with_config(SynthesisConfig::strict())
//!     .build()?;
//! assert_eq!(proxy.trackable_member_names(), vec!["Reference"]);
//! # Ok::<(), chic_tracking::Error>(())
//! ```

use std::{any::TypeId, collections::HashSet, marker::PhantomData};

use log::debug;

use crate::{
    entity::{Entity, EntityShape, MemberAccess, ShapeFlags},
    tracking::{select, InstrumentedMember, ProxyType, ShapeSignature, SynthesisConfig},
    Result,
};

/// Provides a fluent API for synthesizing the tracked type of `T`
pub struct ProxyBuilder<T: Entity + Default> {
    /// Shape of the entity being wrapped
    shape: EntityShape,
    /// Checks to run before instrumenting
    config: SynthesisConfig,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity + Default> ProxyBuilder<T> {
    /// Create a builder for `T` with the default configuration
    #[must_use]
    pub fn new() -> Self {
        ProxyBuilder {
            shape: T::shape(),
            config: SynthesisConfig::default(),
            _entity: PhantomData,
        }
    }

    /// Set the optional checks to run
    ///
    /// ## Arguments
    /// * 'config' - The synthesis configuration
    #[must_use]
    pub fn with_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    /// The shape being wrapped
    #[must_use]
    pub fn shape(&self) -> &EntityShape {
        &self.shape
    }

    /// Validate the shape and build the tracked type
    ///
    /// # Errors
    /// Returns [`crate::Error::Synthesis`] if the shape can not be satisfied.
    pub fn build(self) -> Result<ProxyType> {
        self.validate_shape()?;
        if self.config.validate_members {
            self.validate_members()?;
        }

        let members: Vec<InstrumentedMember> = select(&self.shape)
            .into_iter()
            .map(InstrumentedMember::new)
            .collect();

        let signature = members
            .iter()
            .fold(
                ShapeSignature::new().add_shape(self.shape.kind(), self.shape.name()),
                |signature, member| {
                    signature.add_member(member.name(), &member.member_type(), member.equality())
                },
            )
            .finalize();

        let proxy = ProxyType::new(
            TypeId::of::<T>(),
            std::any::type_name::<T>(),
            self.shape,
            members,
            signature,
        );

        debug!(
            "Synthesized tracked type '{}' for {} ({} of {} members instrumented)",
            proxy.name(),
            proxy.entity_name(),
            proxy.members().len(),
            proxy.shape().members().len()
        );
        Ok(proxy)
    }

    fn validate_shape(&self) -> Result<()> {
        let shape = &self.shape;

        let mut seen = HashSet::new();
        for member in shape.members() {
            if !seen.insert(member.name()) {
                return Err(synthesis_error!(
                    shape.name(),
                    "member '{}' is declared more than once",
                    member.name()
                ));
            }
        }

        if !shape.is_interface() && shape.flags().contains(ShapeFlags::SEALED) {
            return Err(synthesis_error!(
                shape.name(),
                "sealed class can not be extended"
            ));
        }

        if shape.is_interface() {
            if let Some(member) = shape
                .members()
                .iter()
                .find(|member| member.access() != MemberAccess::Public)
            {
                return Err(synthesis_error!(
                    shape.name(),
                    "interface member '{}' is not accessible ({})",
                    member.name(),
                    member.access()
                ));
            }
        }

        Ok(())
    }

    fn validate_members(&self) -> Result<()> {
        let sample = T::default();

        for member in self.shape.members() {
            let Some(value) = sample.read(member.name()) else {
                return Err(synthesis_error!(
                    self.shape.name(),
                    "member '{}' can not be read",
                    member.name()
                ));
            };

            if !member.member_type().accepts(&value) {
                return Err(synthesis_error!(
                    self.shape.name(),
                    "member '{}' is declared as {} but holds {}",
                    member.name(),
                    member.member_type(),
                    value.describe()
                ));
            }
        }

        Ok(())
    }
}

impl<T: Entity + Default> Default for ProxyBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
