// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # chic-tracking
//!
//! Change tracking for entity objects. For every entity type a tracked type is synthesized once
//! and cached; instances of it behave like the plain entity, but every write to a trackable
//! member is intercepted. An instance answers two questions after a unit of work: has anything
//! changed (`is_modified`), and what did each written member hold when tracking began for it
//! (`baseline`).
//!
//! ## Features
//!
//! - **Declarative entities** - The [`entity!`] macro derives shape, accessors and struct
//! - **Class and interface shapes** - Classes track only overridable members, interfaces all
//! - **Type-aware comparison** - Optional value members compare presence first, then by the
//!   value type's own inequality (decimals numerically, date-times by ticks)
//! - **Synthesis cache** - One tracked type per entity type, shared across threads
//! - **Projection** - Seed a tracked instance from an existing plain one
//!
//! ## Quick Start
//!
//! ```rust
//! use chic_tracking::prelude::*;
//!
//! entity! {
//!     #[derive(Debug, Default, Clone)]
//!     pub class Account {
//!         "Owner" => owner: Option<String> [VIRTUAL],
//!         "Balance" => balance: Option<Decimal> [VIRTUAL],
//!         "Opened" => opened: i64 [],
//!     }
//! }
//!
//! let plain = Account {
//!     owner: Some("Grace".into()),
//!     balance: Some(Decimal::new(1000, 2)),
//!     opened: 0,
//! };
//!
//! let mut account = chic_tracking::project(&plain)?;
//! assert!(!account.is_modified());
//!
//! // 10.0 equals 10.00
//! account.set("Balance", Some(Decimal::new(100, 1)))?;
//! assert!(!account.is_modified());
//!
//! account.set("Owner", "Ada")?;
//! assert!(account.is_modified());
//! assert_eq!(account.original_value("Owner"), Some(&Value::from("Grace")));
//! assert_eq!(account.owner.as_deref(), Some("Ada"));
//! # Ok::<(), chic_tracking::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`entity`] - Entity shapes, member descriptors, erased values
//! - [`tracking`] - Member selection, equality, synthesis, the cache and tracked instances
//!
//! ### Logging
//!
//! The crate logs through the [`log`] facade: synthesis and projection at `debug`, cache hits and
//! baseline establishment at `trace`. No logger is installed by the library.
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use chic_tracking::prelude::*;
///
/// let generator = ProxyGenerator::new();
/// assert!(Arc::ptr_eq(generator.registry(), &ProxyRegistry::global()));
/// ```
pub mod prelude;

/// Entity shapes and erased member values
pub mod entity;

/// The change tracking engine
pub mod tracking;

/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `chic-tracking` Error type
///
/// # Examples
///
/// ```rust
/// use chic_tracking::{entity, Error};
///
/// entity! {
///     #[derive(Debug, Default)]
///     pub class Draft {
///         "Title" => title: Option<String> [VIRTUAL],
///     }
/// }
///
/// let mut draft = chic_tracking::create_instance::<Draft>()?;
/// match draft.set("Subtitle", "x") {
///     Err(Error::MemberNotFound(name)) => assert_eq!(name, "Subtitle"),
///     other => panic!("unexpected: {:?}", other),
/// }
/// # Ok::<(), chic_tracking::Error>(())
/// ```
pub use error::Error;

pub use entity::Entity;
pub use tracking::{
    ChangeTracking, ProxyGenerator, ProxyRegistry, ProxyType, ProxyTypeRc, SynthesisConfig,
    Tracked,
};

/// The tracked type of `T`, from the process-wide cache
///
/// # Errors
/// Returns [`Error::Synthesis`] if `T` can not be wrapped.
pub fn tracked_type<T: Entity + Default>() -> Result<ProxyTypeRc> {
    ProxyGenerator::new().tracked_type::<T>()
}

/// A default-initialized tracked instance of `T`
///
/// # Errors
/// Returns [`Error::Synthesis`] if `T` can not be wrapped.
pub fn create_instance<T: Entity + Default>() -> Result<Tracked<T>> {
    ProxyGenerator::new().create_instance::<T>()
}

/// A tracked instance of `T` seeded from `source`
///
/// # Errors
/// Returns [`Error::Synthesis`] if `T` can not be wrapped, or [`Error::Projection`] if a member
/// could not be copied.
pub fn project<T: Entity + Default>(source: &T) -> Result<Tracked<T>> {
    ProxyGenerator::new().project(source)
}
