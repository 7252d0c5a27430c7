//! Tracked instances.

use std::{fmt, ops::Deref, sync::Arc};

use crate::{
    entity::{Entity, MemberValue, Value},
    tracking::{Baseline, ChangeState, ChangeTracking, ProxyTypeRc},
    Error, Result,
};

/// An instance of a synthesized tracked type
///
/// Owns a `T` as its backing storage and derefs to it, so a `&Tracked<T>` can be used wherever a
/// `&T` is expected. Writes go through [`Tracked::set`], which applies the instrumentation of the
/// tracked type; members that are not tracked are written straight through to the entity.
///
/// The instance is not internally synchronized. Writes need `&mut self`, share it behind a lock
/// if several threads write to it.
pub struct Tracked<T: Entity> {
    entity: T,
    proxy: ProxyTypeRc,
    changes: ChangeState,
}

impl<T: Entity> Tracked<T> {
    pub(crate) fn new(proxy: ProxyTypeRc, entity: T) -> Self {
        Tracked {
            entity,
            proxy,
            changes: ChangeState::new(),
        }
    }

    /// The tracked type this is an instance of
    #[must_use]
    pub fn proxy_type(&self) -> &ProxyTypeRc {
        &self.proxy
    }

    /// The wrapped entity
    #[must_use]
    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// Unwrap the entity, discarding the tracking state
    #[must_use]
    pub fn into_inner(self) -> T {
        self.entity
    }

    /// Read the current value of a declared member
    ///
    /// Reads never touch the tracking state.
    ///
    /// # Errors
    /// Returns [`Error::MemberNotFound`] for undeclared members and [`Error::MemberNotReadable`]
    /// if the entity produced no value.
    pub fn get(&self, member: &str) -> Result<Value> {
        if self.proxy.shape().get_member(member).is_none() {
            return Err(Error::MemberNotFound(member.to_string()));
        }

        self.entity
            .read(member)
            .ok_or_else(|| Error::MemberNotReadable(member.to_string()))
    }

    /// Read the current value of a declared member as a concrete type
    ///
    /// # Errors
    /// As [`Tracked::get`], plus [`Error::TypeMismatch`] if the value is not a `V`.
    pub fn get_as<V: MemberValue>(&self, member: &str) -> Result<V> {
        V::from_member_value(member, self.get(member)?)
    }

    /// Write `value` into `member`
    ///
    /// # Errors
    /// See [`Tracked::set_value`].
    pub fn set(&mut self, member: &str, value: impl Into<Value>) -> Result<()> {
        self.set_value(member, value.into())
    }

    /// Write an erased value into `member`
    ///
    /// The value is checked against the declared type before anything is stored. For a tracked
    /// member the first write records the baseline, later writes raise the modified flag when the
    /// value differs from the current one.
    ///
    /// # Errors
    /// Returns [`Error::MemberNotFound`] for undeclared members, [`Error::MemberNotSettable`] for
    /// read-only members and [`Error::TypeMismatch`] if the value does not fit.
    pub fn set_value(&mut self, member: &str, value: Value) -> Result<()> {
        let Some(descriptor) = self.proxy.shape().get_member(member) else {
            return Err(Error::MemberNotFound(member.to_string()));
        };
        if !descriptor.is_settable() {
            return Err(Error::MemberNotSettable(member.to_string()));
        }
        descriptor.member_type().check(member, &value)?;

        match self.proxy.instrumented(member) {
            Some(instrumented) => {
                instrumented.intercept(&mut self.entity, &mut self.changes, value)
            }
            None => self.entity.write(member, value),
        }
    }

    /// Copy every declared member of `source` into this instance, in declaration order
    ///
    /// Stops at the first member that can not be copied. Members copied before it keep their new
    /// value and baseline; members after it are left untouched.
    ///
    /// # Errors
    /// Returns [`Error::Projection`] naming the member that failed.
    pub fn project_from(&mut self, source: &T) -> Result<()> {
        let proxy = Arc::clone(&self.proxy);

        for descriptor in proxy.shape().members() {
            let name = descriptor.name();
            source
                .read(name)
                .ok_or_else(|| Error::MemberNotReadable(name.to_string()))
                .and_then(|value| self.set_value(name, value))
                .map_err(|error| Error::Projection {
                    member: name.to_string(),
                    source: Box::new(error),
                })?;
        }

        Ok(())
    }
}

impl<T: Entity> ChangeTracking for Tracked<T> {
    fn is_modified(&self) -> bool {
        self.changes.is_modified()
    }

    fn baseline(&self) -> Option<&Baseline> {
        self.changes.baseline()
    }
}

impl<T: Entity> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

impl<T: Entity> AsRef<T> for Tracked<T> {
    fn as_ref(&self) -> &T {
        &self.entity
    }
}

impl<T: Entity + fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("type", &self.proxy.name())
            .field("entity", &self.entity)
            .field("changes", &self.changes)
            .finish()
    }
}
