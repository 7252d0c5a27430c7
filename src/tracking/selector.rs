//! Selection of the members a tracked type instruments.

use crate::entity::{EntityShape, MemberDescriptor, MemberType};

/// A member chosen for instrumentation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackableMember {
    name: String,
    member_type: MemberType,
    ordinal: usize,
}

impl TrackableMember {
    fn from_descriptor(ordinal: usize, descriptor: &MemberDescriptor) -> Self {
        TrackableMember {
            name: descriptor.name().to_string(),
            member_type: descriptor.member_type(),
            ordinal,
        }
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

    /// Position of the member in its shape's declaration order
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Enumerate the members of `shape` eligible for instrumentation, in declaration order
///
/// For an interface every settable member is included. For a class only settable members whose
/// setter is overridable are included; everything else is silently left out.
#[must_use]
pub fn select(shape: &EntityShape) -> Vec<TrackableMember> {
    let interface = shape.is_interface();

    shape
        .members()
        .iter()
        .enumerate()
        .filter(|(_, member)| {
            if interface {
                member.is_settable()
            } else {
                member.is_overridable()
            }
        })
        .map(|(ordinal, member)| TrackableMember::from_descriptor(ordinal, member))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{AccessorFlags, ShapeKind, ValueKind};

    fn member(name: &str) -> MemberDescriptor {
        MemberDescriptor::new(name, MemberType::new(ValueKind::I4))
    }

    #[test]
    fn test_class_selects_overridable_setters() {
        let shape = EntityShape::new("Widget", ShapeKind::Class)
            .member(member("Virtual").with_setter(AccessorFlags::VIRTUAL))
            .member(member("Plain"))
            .member(member("Sealed").with_setter(AccessorFlags::VIRTUAL | AccessorFlags::FINAL))
            .member(member("Abstract").with_setter(AccessorFlags::VIRTUAL | AccessorFlags::ABSTRACT))
            .member(member("ReadOnly").read_only());

        let selected = select(&shape);
        let names: Vec<_> = selected.iter().map(TrackableMember::name).collect();

        assert_eq!(names, vec!["Virtual", "Abstract"]);
        assert_eq!(selected[0].ordinal(), 0);
        assert_eq!(selected[1].ordinal(), 3);
    }

    #[test]
    fn test_interface_selects_all_settable() {
        let shape = EntityShape::new("IWidget", ShapeKind::Interface)
            .member(member("A"))
            .member(member("B").with_setter(AccessorFlags::VIRTUAL | AccessorFlags::FINAL))
            .member(member("C").read_only());

        let selected = select(&shape);
        let names: Vec<_> = selected.iter().map(TrackableMember::name).collect();

        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_no_members() {
        let shape = EntityShape::new("Empty", ShapeKind::Class).member(member("Plain"));
        assert!(select(&shape).is_empty());
    }
}
