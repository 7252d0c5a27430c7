//! Type-erased member values and declared member types.
//!
//! [`Value`] is the erased form in which member values travel between an entity, its tracked
//! wrapper and the baseline map. [`MemberType`] is the declared type of a member: a
//! [`ValueKind`] plus whether the member is nullable. [`MemberValue`] connects concrete Rust field
//! types to both, and is implemented once per kind for the plain type and for its `Option`.

use std::{any::Any, fmt, sync::Arc};

use strum::{Display, EnumIter};
use uguid::Guid;

use crate::{
    entity::{DateTime, Decimal, TimeSpan},
    Error, Result,
};

/// The kind of data a member holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ValueKind {
    /// `bool`
    Boolean,
    /// `char`
    Char,
    /// `i8`
    I1,
    /// `u8`
    U1,
    /// `i16`
    I2,
    /// `u16`
    U2,
    /// `i32`
    I4,
    /// `u32`
    U4,
    /// `i64`
    I8,
    /// `u64`
    U8,
    /// `isize`
    I,
    /// `usize`
    U,
    /// `f32`
    R4,
    /// `f64`
    R8,
    /// [`Decimal`]
    Decimal,
    /// [`DateTime`]
    DateTime,
    /// [`TimeSpan`]
    TimeSpan,
    /// [`uguid::Guid`]
    Guid,
    /// `String`
    String,
    /// `Vec<u8>`
    Bytes,
    /// [`ObjectRef`]
    Object,
}

impl ValueKind {
    /// Check if values of this kind are value types (copied, compared by content)
    #[must_use]
    pub fn is_value_type(&self) -> bool {
        !self.is_reference_type()
    }

    /// Check if values of this kind are reference types
    #[must_use]
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self,
            ValueKind::String | ValueKind::Bytes | ValueKind::Object
        )
    }
}

/// A reference-typed value, compared by identity
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Any + Send + Sync>);

impl ObjectRef {
    /// Wrap an arbitrary shared object
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        ObjectRef(Arc::new(value))
    }

    /// Wrap an already shared object, keeping its identity
    pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
        ObjectRef(value)
    }

    /// Borrow the object if it is a `T`
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns true if both handles point to the same object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({:p})", Arc::as_ptr(&self.0))
    }
}

/// A type-erased member value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value (an empty optional, or a null reference)
    #[default]
    None,
    /// Boolean value
    Boolean(bool),
    /// Character value
    Char(char),
    /// 8-bit signed integer
    I1(i8),
    /// 8-bit unsigned integer
    U1(u8),
    /// 16-bit signed integer
    I2(i16),
    /// 16-bit unsigned integer
    U2(u16),
    /// 32-bit signed integer
    I4(i32),
    /// 32-bit unsigned integer
    U4(u32),
    /// 64-bit signed integer
    I8(i64),
    /// 64-bit unsigned integer
    U8(u64),
    /// platform isize
    I(isize),
    /// platform usize
    U(usize),
    /// 32-bit floating point
    R4(f32),
    /// 64-bit floating point
    R8(f64),
    /// Decimal value
    Decimal(Decimal),
    /// Point in time
    DateTime(DateTime),
    /// Duration
    TimeSpan(TimeSpan),
    /// Globally unique identifier
    Guid(Guid),
    /// String value
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Shared object reference
    Object(ObjectRef),
}

impl Value {
    /// The kind of the held value, `None` for [`Value::None`]
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Value::None => return None,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Char(_) => ValueKind::Char,
            Value::I1(_) => ValueKind::I1,
            Value::U1(_) => ValueKind::U1,
            Value::I2(_) => ValueKind::I2,
            Value::U2(_) => ValueKind::U2,
            Value::I4(_) => ValueKind::I4,
            Value::U4(_) => ValueKind::U4,
            Value::I8(_) => ValueKind::I8,
            Value::U8(_) => ValueKind::U8,
            Value::I(_) => ValueKind::I,
            Value::U(_) => ValueKind::U,
            Value::R4(_) => ValueKind::R4,
            Value::R8(_) => ValueKind::R8,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::TimeSpan(_) => ValueKind::TimeSpan,
            Value::Guid(_) => ValueKind::Guid,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Object(_) => ValueKind::Object,
        })
    }

    /// Returns true for [`Value::None`]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Short description used in error messages: the kind name, or `None`
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind() {
            Some(kind) => kind.to_string(),
            None => "None".to_string(),
        }
    }

    /// Structural (bitwise) equality
    ///
    /// Floats compare by bit pattern, [`Decimal`] and [`DateTime`] compare their full
    /// representation, objects compare by identity. Values of different kinds are never equal.
    #[must_use]
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::R4(a), Value::R4(b)) => a.to_bits() == b.to_bits(),
            (Value::R8(a), Value::R8(b)) => a.to_bits() == b.to_bits(),
            (Value::Decimal(a), Value::Decimal(b)) => a.structural_eq(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.structural_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Char(value) => write!(f, "'{value}'"),
            Value::I1(value) => write!(f, "{value}"),
            Value::U1(value) => write!(f, "{value}"),
            Value::I2(value) => write!(f, "{value}"),
            Value::U2(value) => write!(f, "{value}"),
            Value::I4(value) => write!(f, "{value}"),
            Value::U4(value) => write!(f, "{value}"),
            Value::I8(value) => write!(f, "{value}"),
            Value::U8(value) => write!(f, "{value}"),
            Value::I(value) => write!(f, "{value}"),
            Value::U(value) => write!(f, "{value}"),
            Value::R4(value) => write!(f, "{value}"),
            Value::R8(value) => write!(f, "{value}"),
            Value::Decimal(value) => write!(f, "{value}"),
            Value::DateTime(value) => write!(f, "{value}"),
            Value::TimeSpan(value) => write!(f, "{value}"),
            Value::Guid(value) => write!(f, "{value}"),
            Value::String(value) => write!(f, "\"{value}\""),
            Value::Bytes(value) => write!(f, "{} bytes", value.len()),
            Value::Object(value) => write!(f, "{value:?}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

/// The declared type of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberType {
    kind: ValueKind,
    nullable: bool,
}

impl MemberType {
    /// A non-nullable member of `kind`
    #[must_use]
    pub const fn new(kind: ValueKind) -> Self {
        MemberType {
            kind,
            nullable: false,
        }
    }

    /// A nullable member of `kind` (it may or may not hold a value)
    #[must_use]
    pub const fn optional(kind: ValueKind) -> Self {
        MemberType {
            kind,
            nullable: true,
        }
    }

    /// The underlying kind
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether the member may be absent
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns true for a value type wrapped in an optional
    #[must_use]
    pub fn is_lifted(&self) -> bool {
        self.nullable && self.kind.is_value_type()
    }

    /// Check whether `value` can be stored in a member of this type
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match value.kind() {
            Some(kind) => kind == self.kind,
            None => self.nullable,
        }
    }

    /// Like [`MemberType::accepts`], but produces a [`Error::TypeMismatch`] naming `member`
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] if the value does not fit.
    pub fn check(&self, member: &str, value: &Value) -> Result<()> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                member: member.to_string(),
                expected: *self,
                found: value.describe(),
            })
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "Nullable<{}>", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

/// Conversion between a concrete member field type and its erased [`Value`]
pub trait MemberValue: Sized {
    /// The declared type a field of this Rust type maps to
    const MEMBER_TYPE: MemberType;

    /// Erase the value
    fn into_value(self) -> Value;

    /// Recover the concrete value, handing the erased value back if it does not fit
    ///
    /// # Errors
    /// Returns the original value if its kind does not match.
    fn try_from_value(value: Value) -> std::result::Result<Self, Value>;

    /// Recover the concrete value of `member`
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] if the value does not fit.
    fn from_member_value(member: &str, value: Value) -> Result<Self> {
        Self::try_from_value(value).map_err(|value| Error::TypeMismatch {
            member: member.to_string(),
            expected: Self::MEMBER_TYPE,
            found: value.describe(),
        })
    }
}

macro_rules! impl_member_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl MemberValue for $ty {
                const MEMBER_TYPE: MemberType = MemberType::new(ValueKind::$kind);

                fn into_value(self) -> Value {
                    Value::$kind(self)
                }

                fn try_from_value(value: Value) -> std::result::Result<Self, Value> {
                    match value {
                        Value::$kind(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }

            impl MemberValue for Option<$ty> {
                const MEMBER_TYPE: MemberType = MemberType::optional(ValueKind::$kind);

                fn into_value(self) -> Value {
                    match self {
                        Some(inner) => Value::$kind(inner),
                        None => Value::None,
                    }
                }

                fn try_from_value(value: Value) -> std::result::Result<Self, Value> {
                    match value {
                        Value::None => Ok(None),
                        Value::$kind(inner) => Ok(Some(inner)),
                        other => Err(other),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$kind(value)
                }
            }

            impl From<Option<$ty>> for Value {
                fn from(value: Option<$ty>) -> Self {
                    <Option<$ty> as MemberValue>::into_value(value)
                }
            }
        )*
    };
}

impl_member_value!(
    bool => Boolean,
    char => Char,
    i8 => I1,
    u8 => U1,
    i16 => I2,
    u16 => U2,
    i32 => I4,
    u32 => U4,
    i64 => I8,
    u64 => U8,
    isize => I,
    usize => U,
    f32 => R4,
    f64 => R8,
    Decimal => Decimal,
    DateTime => DateTime,
    TimeSpan => TimeSpan,
    Guid => Guid,
    String => String,
    Vec<u8> => Bytes,
    ObjectRef => Object,
);
