//! Change tracking engine.
//!
//! This module synthesizes, per entity type, a tracked type that intercepts writes to the
//! entity's trackable members. Each tracked instance carries a dirty flag and a baseline map: the
//! first write to a member records the written value as that member's baseline, and any later
//! write of a different value marks the instance as modified.
//!
//! # Key Components
//!
//! - [`ProxyGenerator`] - Entry point: tracked types, fresh instances and projections
//! - [`ProxyRegistry`] - Process-wide cache of synthesized types keyed by entity `TypeId`
//! - [`ProxyBuilder`] - Validates a shape and builds its [`ProxyType`]
//! - [`Tracked`] - An instance of a tracked type
//! - [`ChangeTracking`] - The dirty flag and baseline surface every tracked instance exposes
//! - [`EqualityMode`] - How a member's old and new values are compared
//! - [`select`] - Which members of a shape are trackable
//!
//! # Member Selection
//!
//! For an interface every settable member is tracked. For a class only members whose setter is
//! `VIRTUAL` and neither `FINAL` nor `STATIC` are tracked; the rest pass through unchanged.
//!
//! # Examples
//!
//! ```rust
//! use chic_tracking::{entity, entity::Value, tracking::{ChangeTracking, ProxyGenerator}};
//!
//! entity! {
//!     #[derive(Debug, Default)]
//!     pub class Person {
//!         "Name" => name: Option<String> [VIRTUAL],
//!     }
//! }
//!
//! let mut person = ProxyGenerator::new().create_instance::<Person>()?;
//!
//! person.set("Name", "Hello")?;
//! assert!(!person.is_modified());
//!
//! person.set("Name", "World")?;
//! assert!(person.is_modified());
//! assert_eq!(person.original_value("Name"), Some(&Value::from("Hello")));
//! # Ok::<(), chic_tracking::Error>(())
//! ```

mod builder;
mod config;
mod contract;
mod equality;
mod generator;
mod hash;
mod instance;
mod proxy;
mod registry;
mod selector;

pub use builder::ProxyBuilder;
pub use config::SynthesisConfig;
pub use contract::{Baseline, ChangeState, ChangeTracking};
pub use equality::{differs, EqualityMode, InequalityFn};
pub use generator::ProxyGenerator;
pub use hash::ShapeSignature;
pub use instance::Tracked;
pub use proxy::{InstrumentedMember, ProxyType, ProxyTypeRc};
pub use registry::ProxyRegistry;
pub use selector::{select, TrackableMember};
