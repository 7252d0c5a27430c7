//! Synthesized tracked types and their instrumented members.
//!
//! A [`ProxyType`] is the runtime stand-in for a generated subclass: it remembers which entity it
//! was built for, the shape it satisfies and, for each trackable member, how writes to that
//! member are intercepted. Proxy types are immutable once built and shared through
//! [`ProxyTypeRc`].

use std::{any::TypeId, collections::HashMap, fmt, sync::Arc};

use log::trace;

use crate::{
    entity::{Entity, EntityShape, MemberType, Value},
    tracking::{ChangeState, EqualityMode, TrackableMember, Tracked},
    Error, Result,
};

/// A reference-counted pointer to a [`ProxyType`]
pub type ProxyTypeRc = Arc<ProxyType>;

/// A trackable member together with the write interception synthesized for it
#[derive(Debug, Clone)]
pub struct InstrumentedMember {
    member: TrackableMember,
    equality: EqualityMode,
}

impl InstrumentedMember {
    /// Instrument `member`, choosing the equality mode from its declared type
    #[must_use]
    pub fn new(member: TrackableMember) -> Self {
        let equality = EqualityMode::for_member(&member.member_type());
        InstrumentedMember { member, equality }
    }

    /// The member name
    #[must_use]
    pub fn name(&self) -> &str {
        self.member.name()
    }

    /// The declared type
    #[must_use]
    pub fn member_type(&self) -> MemberType {
        self.member.member_type()
    }

    /// The equality mode used to detect changes
    #[must_use]
    pub fn equality(&self) -> &EqualityMode {
        &self.equality
    }

    /// The selected member this instrumentation was built from
    #[must_use]
    pub fn trackable(&self) -> &TrackableMember {
        &self.member
    }

    /// Store `value` into `entity`, updating `changes` according to the write protocol
    ///
    /// The first write to the member records `value` as its baseline and leaves the dirty flag
    /// alone. Every later write compares the current value with `value` and raises the flag when
    /// they differ. The value is always stored, and an existing baseline is never replaced.
    ///
    /// # Errors
    /// Returns [`Error::MemberNotReadable`] if the current value can not be read back, or any
    /// error produced by [`Entity::write`].
    pub fn intercept<T: Entity>(
        &self,
        entity: &mut T,
        changes: &mut ChangeState,
        value: Value,
    ) -> Result<()> {
        let name = self.member.name();
        changes.ensure_baseline();

        if !changes.has_baseline(name) {
            entity.write(name, value.clone())?;
            changes.record_baseline(name, value);
            trace!("Baseline established for member '{name}'");
            return Ok(());
        }

        let current = entity
            .read(name)
            .ok_or_else(|| Error::MemberNotReadable(name.to_string()))?;
        let changed = self.equality.differs(&current, &value);

        entity.write(name, value)?;
        if changed {
            changes.mark_modified();
        }
        Ok(())
    }
}

/// A tracked type synthesized for one entity type
///
/// Structurally it satisfies the entity's shape: members the selector left out behave exactly as
/// they do on the plain entity, selected members are instrumented.
pub struct ProxyType {
    entity: TypeId,
    entity_name: &'static str,
    name: String,
    shape: EntityShape,
    members: Vec<InstrumentedMember>,
    lookup: HashMap<String, usize>,
    signature: u64,
}

impl ProxyType {
    pub(crate) fn new(
        entity: TypeId,
        entity_name: &'static str,
        shape: EntityShape,
        members: Vec<InstrumentedMember>,
        signature: u64,
    ) -> Self {
        let lookup = members
            .iter()
            .enumerate()
            .map(|(index, member)| (member.name().to_string(), index))
            .collect();

        ProxyType {
            entity,
            entity_name,
            name: format!("{}_Proxy_{signature:016x}", shape.name()),
            shape,
            members,
            lookup,
            signature,
        }
    }

    /// The generated type name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `TypeId` of the wrapped entity type
    #[must_use]
    pub fn entity_type(&self) -> TypeId {
        self.entity
    }

    /// The Rust type name of the wrapped entity type
    #[must_use]
    pub fn entity_name(&self) -> &'static str {
        self.entity_name
    }

    /// The entity shape this type satisfies
    #[must_use]
    pub fn shape(&self) -> &EntityShape {
        &self.shape
    }

    /// The instrumented members, in declaration order
    #[must_use]
    pub fn members(&self) -> &[InstrumentedMember] {
        &self.members
    }

    /// The instrumentation of `member`, `None` if the member is not tracked
    #[must_use]
    pub fn instrumented(&self, member: &str) -> Option<&InstrumentedMember> {
        self.lookup.get(member).map(|&index| &self.members[index])
    }

    /// Returns true if writes to `member` are tracked
    #[must_use]
    pub fn is_tracked(&self, member: &str) -> bool {
        self.lookup.contains_key(member)
    }

    /// Names of the tracked members, in declaration order
    #[must_use]
    pub fn trackable_member_names(&self) -> Vec<&str> {
        self.members.iter().map(InstrumentedMember::name).collect()
    }

    /// The 64-bit shape signature
    #[must_use]
    pub fn signature(&self) -> u64 {
        self.signature
    }

    /// Returns true if `instance` is an instance of this tracked type
    #[must_use]
    pub fn is_instance<T: Entity>(&self, instance: &Tracked<T>) -> bool {
        **instance.proxy_type() == *self
    }
}

impl PartialEq for ProxyType {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity && self.signature == other.signature
    }
}

impl Eq for ProxyType {}

impl fmt::Debug for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyType")
            .field("name", &self.name)
            .field("entity", &self.entity_name)
            .field("tracked", &self.trackable_member_names())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test::{NullableCount, TestType},
        tracking::{select, ChangeTracking},
    };

    fn instrument(shape: &EntityShape, name: &str) -> InstrumentedMember {
        let member = select(shape)
            .into_iter()
            .find(|member| member.name() == name)
            .expect("member is trackable");
        InstrumentedMember::new(member)
    }

    #[test]
    fn test_first_write_records_baseline() {
        let member = instrument(&<TestType as Entity>::shape(), "TestProperty");
        let mut entity = TestType::default();
        let mut changes = ChangeState::new();

        member
            .intercept(&mut entity, &mut changes, Value::from("Hello"))
            .unwrap();

        assert!(!changes.is_modified());
        assert_eq!(changes.original_value("TestProperty"), Some(&Value::from("Hello")));
        assert_eq!(entity.test_property.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_later_write_compares_current_value() {
        let member = instrument(&<NullableCount as Entity>::shape(), "Count");
        let mut entity = NullableCount::default();
        let mut changes = ChangeState::new();

        member.intercept(&mut entity, &mut changes, Value::I4(0)).unwrap();
        member.intercept(&mut entity, &mut changes, Value::I4(0)).unwrap();
        assert!(!changes.is_modified());

        member.intercept(&mut entity, &mut changes, Value::I4(1)).unwrap();
        assert!(changes.is_modified());
        assert_eq!(changes.original_value("Count"), Some(&Value::I4(0)));
        assert_eq!(entity.count, Some(1));
    }

    #[test]
    fn test_failed_first_write_records_nothing() {
        let member = instrument(&<NullableCount as Entity>::shape(), "Count");
        let mut entity = NullableCount::default();
        let mut changes = ChangeState::new();

        assert!(member
            .intercept(&mut entity, &mut changes, Value::from("one"))
            .is_err());
        assert!(!changes.has_baseline("Count"));
    }

    #[test]
    fn test_proxy_type_lookup() {
        let shape = <TestType as Entity>::shape();
        let members = select(&shape)
            .into_iter()
            .map(InstrumentedMember::new)
            .collect();
        let proxy = ProxyType::new(
            TypeId::of::<TestType>(),
            std::any::type_name::<TestType>(),
            shape,
            members,
            0xABCD,
        );

        assert_eq!(proxy.name(), "TestType_Proxy_000000000000abcd");
        assert!(proxy.is_tracked("TestProperty"));
        assert!(!proxy.is_tracked("UntrackableProperty"));
        assert!(proxy.instrumented("BoxProperty").is_some());
        assert_eq!(proxy.trackable_member_names(), vec!["TestProperty", "BoxProperty"]);
    }
}
