//! Entity shapes and their erased member values.
//!
//! This module describes *what* can be tracked. An entity is any Rust type that implements
//! [`Entity`]: it reports its [`EntityShape`] (class or interface, with member descriptors) and
//! offers erased, name-based read and write access to its members. The [`crate::entity!`] macro
//! derives all of this from a struct declaration.
//!
//! # Key Components
//!
//! - [`Entity`]: The capability every trackable entity provides
//! - [`EntityShape`], [`MemberDescriptor`]: Shape and member descriptors
//! - [`AccessorFlags`], [`ShapeFlags`]: Modifier flags deciding what is overridable
//! - [`Value`], [`ValueKind`], [`MemberType`]: Erased values and declared member types
//! - [`MemberValue`]: Mapping between Rust field types and [`MemberType`]
//! - [`Decimal`], [`DateTime`], [`TimeSpan`]: Value types with their own equality operators
//!
//! # Examples
//!
//! ```rust
//! use chic_tracking::{entity, entity::{Entity, ShapeKind, Value}};
//!
//! entity! {
//!     #[derive(Debug, Default, Clone)]
//!     pub interface Contact {
//!         "Email" => email: Option<String>,
//!         "Age" => age: Option<u8>,
//!     }
//! }
//!
//! let shape = Contact::shape();
//! assert_eq!(shape.kind(), ShapeKind::Interface);
//!
//! let mut contact = Contact::default();
//! contact.write("Age", Value::U1(30))?;
//! assert_eq!(contact.read("Age"), Some(Value::U1(30)));
//! # Ok::<(), chic_tracking::Error>(())
//! ```

mod primitives;
mod shape;
mod value;

use std::any::Any;

pub use primitives::{DateTime, DateTimeKind, Decimal, TimeSpan};
pub use shape::{AccessorFlags, EntityShape, MemberAccess, MemberDescriptor, ShapeFlags, ShapeKind};
pub use value::{MemberType, MemberValue, ObjectRef, Value, ValueKind};

use crate::Result;

/// A user-defined entity whose members can be enumerated and accessed by name
///
/// Implementations must be consistent: every member in [`Entity::shape`] should be readable
/// through [`Entity::read`], and every settable member writable through [`Entity::write`].
/// Synthesis verifies the read side against a default instance.
pub trait Entity: Any + Send + Sync {
    /// Describe the shape of this entity type
    fn shape() -> EntityShape
    where
        Self: Sized;

    /// Read the current value of `member`, `None` if no such member exists
    fn read(&self, member: &str) -> Option<Value>;

    /// Store `value` into `member`
    ///
    /// # Errors
    /// Returns [`crate::Error::MemberNotFound`] for unknown members, and
    /// [`crate::Error::TypeMismatch`] if the value does not fit the member.
    fn write(&mut self, member: &str, value: Value) -> Result<()>;
}
