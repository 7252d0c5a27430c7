//! Entity fixtures shared by the unit tests.

use std::sync::Arc;

use crate::{
    entity::{
        AccessorFlags, Entity, EntityShape, MemberAccess, MemberDescriptor, MemberType,
        MemberValue, ShapeFlags, ShapeKind, Value, ValueKind,
    },
    tracking::{ProxyGenerator, ProxyRegistry},
    Error, Result,
};

/// A generator over a fresh registry, so tests don't observe each other's cache
pub fn generator() -> ProxyGenerator {
    ProxyGenerator::with_registry(Arc::new(ProxyRegistry::new()))
}

entity! {
    /// Class with one tracked reference member, one untracked member and one tracked value member
    #[derive(Debug, Default, Clone, PartialEq)]
    pub class TestType {
        "TestProperty" => test_property: Option<String> [VIRTUAL],
        "UntrackableProperty" => untrackable_property: Option<String> [],
        "BoxProperty" => box_property: i32 [VIRTUAL],
    }
}

entity! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub interface ITestType {
        "TestProperty" => test_property: Option<String>,
    }
}

entity! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub class NullableCount {
        "Count" => count: Option<i32> [VIRTUAL],
    }
}

/// Sealed class, can not be extended
#[derive(Debug, Default)]
pub struct SealedType {
    pub value: i32,
}

impl Entity for SealedType {
    fn shape() -> EntityShape {
        EntityShape::new("SealedType", ShapeKind::Class)
            .with_flags(ShapeFlags::SEALED)
            .member(
                MemberDescriptor::new("Value", MemberType::new(ValueKind::I4))
                    .with_setter(AccessorFlags::VIRTUAL),
            )
    }

    fn read(&self, member: &str) -> Option<Value> {
        (member == "Value").then_some(Value::I4(self.value))
    }

    fn write(&mut self, member: &str, value: Value) -> Result<()> {
        match member {
            "Value" => {
                self.value = i32::from_member_value(member, value)?;
                Ok(())
            }
            _ => Err(Error::MemberNotFound(member.to_string())),
        }
    }
}

/// Interface declaring a member that is not publicly accessible
#[derive(Debug, Default)]
pub struct HiddenMember {
    pub secret: Option<String>,
}

impl Entity for HiddenMember {
    fn shape() -> EntityShape {
        EntityShape::new("HiddenMember", ShapeKind::Interface).member(
            MemberDescriptor::new("Secret", MemberType::optional(ValueKind::String))
                .with_access(MemberAccess::Private),
        )
    }

    fn read(&self, member: &str) -> Option<Value> {
        (member == "Secret").then(|| self.secret.clone().into_value())
    }

    fn write(&mut self, member: &str, value: Value) -> Result<()> {
        match member {
            "Secret" => {
                self.secret = Option::<String>::from_member_value(member, value)?;
                Ok(())
            }
            _ => Err(Error::MemberNotFound(member.to_string())),
        }
    }
}

/// Declares a member its accessors don't know about
#[derive(Debug, Default)]
pub struct Unreadable;

impl Entity for Unreadable {
    fn shape() -> EntityShape {
        EntityShape::new("Unreadable", ShapeKind::Interface)
            .member(MemberDescriptor::new("Ghost", MemberType::new(ValueKind::I4)))
    }

    fn read(&self, _member: &str) -> Option<Value> {
        None
    }

    fn write(&mut self, member: &str, _value: Value) -> Result<()> {
        Err(Error::MemberNotFound(member.to_string()))
    }
}

/// Class with a tracked `Id` followed by a read-only `Name`
#[derive(Debug, Default, Clone)]
pub struct ReadOnlyName {
    pub id: i32,
    pub name: String,
}

impl Entity for ReadOnlyName {
    fn shape() -> EntityShape {
        EntityShape::new("ReadOnlyName", ShapeKind::Class)
            .member(
                MemberDescriptor::new("Id", MemberType::new(ValueKind::I4))
                    .with_setter(AccessorFlags::VIRTUAL),
            )
            .member(MemberDescriptor::new("Name", MemberType::new(ValueKind::String)).read_only())
    }

    fn read(&self, member: &str) -> Option<Value> {
        match member {
            "Id" => Some(Value::I4(self.id)),
            "Name" => Some(Value::String(self.name.clone())),
            _ => None,
        }
    }

    fn write(&mut self, member: &str, value: Value) -> Result<()> {
        match member {
            "Id" => {
                self.id = i32::from_member_value(member, value)?;
                Ok(())
            }
            "Name" => Err(Error::MemberNotSettable(member.to_string())),
            _ => Err(Error::MemberNotFound(member.to_string())),
        }
    }
}

/// How [`Inconsistent`] misreports its `Code` member
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CodeFault {
    /// `Code` reads back as declared
    #[default]
    None,
    /// `Code` reads back as a string
    WrongKind,
    /// `Code` reads back as nothing
    Missing,
}

/// Class with two tracked members whose `read` of `Code` can be made inconsistent with its shape
#[derive(Debug, Default, Clone)]
pub struct Inconsistent {
    pub id: i32,
    pub code: i32,
    pub fault: CodeFault,
}

impl Entity for Inconsistent {
    fn shape() -> EntityShape {
        EntityShape::new("Inconsistent", ShapeKind::Class)
            .member(
                MemberDescriptor::new("Id", MemberType::new(ValueKind::I4))
                    .with_setter(AccessorFlags::VIRTUAL),
            )
            .member(
                MemberDescriptor::new("Code", MemberType::new(ValueKind::I4))
                    .with_setter(AccessorFlags::VIRTUAL),
            )
    }

    fn read(&self, member: &str) -> Option<Value> {
        match (member, self.fault) {
            ("Id", _) => Some(Value::I4(self.id)),
            ("Code", CodeFault::None) => Some(Value::I4(self.code)),
            ("Code", CodeFault::WrongKind) => Some(Value::String(self.code.to_string())),
            _ => None,
        }
    }

    fn write(&mut self, member: &str, value: Value) -> Result<()> {
        match member {
            "Id" => self.id = i32::from_member_value(member, value)?,
            "Code" => self.code = i32::from_member_value(member, value)?,
            _ => return Err(Error::MemberNotFound(member.to_string())),
        }
        Ok(())
    }
}
