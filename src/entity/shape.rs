//! Entity shape descriptors.
//!
//! An [`EntityShape`] describes a user-defined entity the way a type definition describes a .NET
//! class or interface: a name, a flavor ([`ShapeKind`]), type-level flags ([`ShapeFlags`]) and an
//! ordered list of [`MemberDescriptor`]s. Each member carries its declared [`MemberType`], its
//! [`MemberAccess`] and, when settable, the [`AccessorFlags`] of its setter.
//!
//! Shapes are plain immutable values. Their identity is the Rust type that produced them through
//! [`crate::Entity::shape`], not the descriptor contents.
//!
//! # Examples
//!
//! ```rust
//! use chic_tracking::entity::{AccessorFlags, EntityShape, MemberDescriptor, MemberType, ShapeKind, ValueKind};
//!
//! let shape = EntityShape::new("Customer", ShapeKind::Class)
//!     .member(MemberDescriptor::new("Name", MemberType::new(ValueKind::String))
//!         .with_setter(AccessorFlags::VIRTUAL))
//!     .member(MemberDescriptor::new("Id", MemberType::new(ValueKind::I8)).read_only());
//!
//! assert_eq!(shape.members().len(), 2);
//! assert!(shape.get_member("Id").is_some_and(|id| !id.is_settable()));
//! ```

use bitflags::bitflags;

use crate::entity::MemberType;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Accessor (setter) modifiers of a member
    pub struct AccessorFlags: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Accessor cannot be overridden
        const FINAL = 0x0020;
        /// Accessor is virtual
        const VIRTUAL = 0x0040;
        /// Accessor does not provide an implementation
        const ABSTRACT = 0x0400;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Type-level modifiers of an entity shape
    pub struct ShapeFlags: u32 {
        /// Class cannot be extended
        const SEALED = 0x0100;
    }
}

/// The flavor of an entity shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ShapeKind {
    /// A class; only overridable members are tracked
    Class,
    /// An interface; every settable member is tracked
    Interface,
}

/// Visibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum MemberAccess {
    /// Accessible only by the declaring type
    Private,
    /// Accessible by the declaring type and its sub-types
    Family,
    /// Accessible within the declaring crate
    Assembly,
    /// Accessible by anyone
    #[default]
    Public,
}

/// A single declared data member of an entity shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    name: String,
    member_type: MemberType,
    access: MemberAccess,
    setter: Option<AccessorFlags>,
}

impl MemberDescriptor {
    /// Create a public, settable member with a plain (non-virtual) setter
    ///
    /// ## Arguments
    /// * `name` - The member name, unique within its shape
    /// * `member_type` - The declared type of the member
    pub fn new(name: impl Into<String>, member_type: MemberType) -> Self {
        MemberDescriptor {
            name: name.into(),
            member_type,
            access: MemberAccess::Public,
            setter: Some(AccessorFlags::empty()),
        }
    }

    /// Replace the setter modifiers
    #[must_use]
    pub fn with_setter(mut self, flags: AccessorFlags) -> Self {
        self.setter = Some(flags);
        self
    }

    /// Remove the setter, making the member read-only
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.setter = None;
        self
    }

    /// Replace the member visibility
    #[must_use]
    pub fn with_access(mut self, access: MemberAccess) -> Self {
        self.access = access;
        self
    }

    /// The member name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type
    #[must_use]
    pub fn member_type(&self) -> MemberType {
        self.member_type
    }

    /// The member visibility
    #[must_use]
    pub fn access(&self) -> MemberAccess {
        self.access
    }

    /// The setter modifiers, `None` for read-only members
    #[must_use]
    pub fn setter(&self) -> Option<AccessorFlags> {
        self.setter
    }

    /// Returns true if the member has a setter
    #[must_use]
    pub fn is_settable(&self) -> bool {
        self.setter.is_some()
    }

    /// Returns true if the setter can be overridden by a derived type
    ///
    /// A setter is overridable when it is virtual, not finalized and not static.
    #[must_use]
    pub fn is_overridable(&self) -> bool {
        self.setter.is_some_and(|flags| {
            flags.contains(AccessorFlags::VIRTUAL)
                && !flags.intersects(AccessorFlags::FINAL | AccessorFlags::STATIC)
        })
    }
}

/// Describes the data members of a user-defined class or interface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityShape {
    name: String,
    kind: ShapeKind,
    flags: ShapeFlags,
    members: Vec<MemberDescriptor>,
}

impl EntityShape {
    /// Create an empty shape
    ///
    /// ## Arguments
    /// * `name` - The shape name
    /// * `kind` - Class or interface
    pub fn new(name: impl Into<String>, kind: ShapeKind) -> Self {
        EntityShape {
            name: name.into(),
            kind,
            flags: ShapeFlags::empty(),
            members: Vec::new(),
        }
    }

    /// Append a member declaration
    #[must_use]
    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Replace the type-level flags
    #[must_use]
    pub fn with_flags(mut self, flags: ShapeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The shape name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class or interface
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Type-level flags
    #[must_use]
    pub fn flags(&self) -> ShapeFlags {
        self.flags
    }

    /// Returns true for interface shapes
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.kind == ShapeKind::Interface
    }

    /// All declared members, in declaration order
    #[must_use]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Look up a declared member by name
    #[must_use]
    pub fn get_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|member| member.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ValueKind;

    #[test]
    fn test_member_defaults() {
        let member = MemberDescriptor::new("Name", MemberType::new(ValueKind::String));

        assert_eq!(member.name(), "Name");
        assert_eq!(member.access(), MemberAccess::Public);
        assert_eq!(member.setter(), Some(AccessorFlags::empty()));
        assert!(member.is_settable());
        assert!(!member.is_overridable());
    }

    #[test]
    fn test_overridable() {
        let ty = MemberType::new(ValueKind::I4);

        assert!(MemberDescriptor::new("A", ty)
            .with_setter(AccessorFlags::VIRTUAL)
            .is_overridable());
        assert!(MemberDescriptor::new("A", ty)
            .with_setter(AccessorFlags::VIRTUAL | AccessorFlags::ABSTRACT)
            .is_overridable());
        assert!(!MemberDescriptor::new("A", ty)
            .with_setter(AccessorFlags::VIRTUAL | AccessorFlags::FINAL)
            .is_overridable());
        assert!(!MemberDescriptor::new("A", ty)
            .with_setter(AccessorFlags::VIRTUAL | AccessorFlags::STATIC)
            .is_overridable());
        assert!(!MemberDescriptor::new("A", ty).read_only().is_overridable());
    }

    #[test]
    fn test_shape_lookup() {
        let shape = EntityShape::new("Order", ShapeKind::Class)
            .with_flags(ShapeFlags::SEALED)
            .member(MemberDescriptor::new("Id", MemberType::new(ValueKind::I8)).read_only())
            .member(MemberDescriptor::new("Total", MemberType::optional(ValueKind::Decimal)));

        assert_eq!(shape.name(), "Order");
        assert!(!shape.is_interface());
        assert!(shape.flags().contains(ShapeFlags::SEALED));
        assert_eq!(
            shape.members().iter().map(MemberDescriptor::name).collect::<Vec<_>>(),
            vec!["Id", "Total"]
        );
        assert!(shape.get_member("Total").is_some());
        assert!(shape.get_member("Missing").is_none());
    }
}
