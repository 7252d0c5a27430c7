//! Change detection semantics per declared member type.
//!
//! Every instrumented member is assigned an [`EqualityMode`] at synthesis time. The mode decides
//! whether a write of a new value counts as a change with respect to the current value.
//!
//! - [`EqualityMode::Plain`] for reference types and non-nullable value types: values differ iff
//!   they are not structurally equal (identity for objects, bitwise for floats, content for
//!   strings).
//! - [`EqualityMode::Lifted`] for nullable value types: absence is compared first; only if both
//!   sides hold a value are they unwrapped and compared, using the kind's defined inequality when
//!   it has one.
//!
//! # Examples
//!
//! ```rust
//! use chic_tracking::entity::{Decimal, MemberType, Value, ValueKind};
//! use chic_tracking::tracking::differs;
//!
//! let optional = MemberType::optional(ValueKind::Decimal);
//! assert!(differs(&optional, &Value::None, &Value::Decimal(Decimal::new(1, 0))));
//! assert!(!differs(&optional, &Value::None, &Value::None));
//!
//! // 1.0 and 1.00 are the same number
//! assert!(!differs(
//!     &optional,
//!     &Value::Decimal(Decimal::new(10, 1)),
//!     &Value::Decimal(Decimal::new(100, 2)),
//! ));
//! ```

use crate::entity::{MemberType, Value, ValueKind};

/// A kind-specific inequality operation on two present values of the same kind
pub type InequalityFn = fn(&Value, &Value) -> bool;

fn defined_ne(old: &Value, new: &Value) -> bool {
    old != new
}

impl ValueKind {
    /// The inequality operation this kind defines, if any
    ///
    /// Kinds without one are compared by structural equality.
    #[must_use]
    pub fn inequality(&self) -> Option<InequalityFn> {
        match self {
            ValueKind::Decimal | ValueKind::DateTime | ValueKind::TimeSpan => Some(defined_ne),
            _ => None,
        }
    }
}

/// How two values of a member's declared type are compared
#[derive(Debug, Clone, Copy)]
pub enum EqualityMode {
    /// Native equality: identity for references, structural for value types
    Plain,
    /// Optional-aware equality for a nullable value type
    Lifted {
        /// The underlying kind's inequality, `None` to fall back to structural equality
        inequality: Option<InequalityFn>,
    },
}

impl EqualityMode {
    /// Choose the mode for a declared member type
    #[must_use]
    pub fn for_member(member_type: &MemberType) -> Self {
        if member_type.is_lifted() {
            EqualityMode::Lifted {
                inequality: member_type.kind().inequality(),
            }
        } else {
            EqualityMode::Plain
        }
    }

    /// Returns true for [`EqualityMode::Lifted`]
    #[must_use]
    pub fn is_lifted(&self) -> bool {
        matches!(self, EqualityMode::Lifted { .. })
    }

    /// Decide whether writing `new` over `old` is a change
    #[must_use]
    pub fn differs(&self, old: &Value, new: &Value) -> bool {
        match self {
            EqualityMode::Plain => !old.structural_eq(new),
            EqualityMode::Lifted { inequality } => match (old.is_none(), new.is_none()) {
                (true, true) => false,
                (true, false) | (false, true) => true,
                (false, false) => match inequality {
                    Some(ne) => ne(old, new),
                    None => !old.structural_eq(new),
                },
            },
        }
    }
}

/// Decide whether writing `new` over `old` changes a member of `member_type`
#[must_use]
pub fn differs(member_type: &MemberType, old: &Value, new: &Value) -> bool {
    EqualityMode::for_member(member_type).differs(old, new)
}
