use thiserror::Error;

use crate::entity::MemberType;

macro_rules! synthesis_error {
    // Single string version
    ($entity:expr, $msg:expr) => {
        crate::Error::Synthesis {
            entity: $entity.to_string(),
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($entity:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::Synthesis {
            entity: $entity.to_string(),
            message: format!($fmt, $($arg)*),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Synthesis Errors
/// - [`Error::Synthesis`] - A tracked type could not be built for an entity shape
///
/// ## Write / Projection Errors
/// - [`Error::Projection`] - Copying a plain instance into a tracked one stopped part-way
/// - [`Error::TypeMismatch`] - A value does not fit the declared type of a member
/// - [`Error::MemberNotFound`] - The shape declares no member with that name
/// - [`Error::MemberNotReadable`] - A declared member produced no value
/// - [`Error::MemberNotSettable`] - A declared member has no setter
///
/// # Examples
///
/// ```rust
/// use chic_tracking::{entity, Error, ProxyGenerator};
///
/// entity! {
///     #[derive(Debug, Default)]
///     pub class Invoice {
///         "Total" => total: i32 [VIRTUAL],
///     }
/// }
///
/// let mut invoice = ProxyGenerator::new().create_instance::<Invoice>()?;
/// match invoice.set("Total", "a lot") {
///     Err(Error::TypeMismatch { member, .. }) => assert_eq!(member, "Total"),
///     other => panic!("unexpected result: {:?}", other),
/// }
/// # Ok::<(), chic_tracking::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The entity shape cannot be structurally satisfied by a tracked type.
    ///
    /// Raised by [`crate::ProxyGenerator::tracked_type`] when, for example, a class shape is
    /// sealed, an interface member is not publicly accessible, two members share a name, or a
    /// declared member cannot be read back from a default instance. Nothing is cached when
    /// synthesis fails.
    ///
    /// # Fields
    ///
    /// * `entity` - Name of the entity shape
    /// * `message` - What could not be satisfied
    #[error("Synthesis of '{entity}' failed: {message}")]
    Synthesis {
        /// Name of the entity shape the synthesis was requested for
        entity: String,
        /// Description of the unsatisfiable requirement
        message: String,
    },

    /// Copying a member from a plain instance into a tracked instance failed.
    ///
    /// Members copied before `member` keep their new value and baseline, members after it are
    /// left untouched.
    #[error("Projection stopped at member '{member}': {source}")]
    Projection {
        /// The member at which the projection stopped
        member: String,
        /// The underlying failure
        source: Box<Error>,
    },

    /// A value was written to (or read as) a member whose declared type does not accept it.
    #[error("Member '{member}' expects {expected}, found {found}")]
    TypeMismatch {
        /// Name of the member
        member: String,
        /// The declared type of the member
        expected: MemberType,
        /// Description of the offending value
        found: String,
    },

    /// The entity shape does not declare a member with this name.
    #[error("No member named '{0}'")]
    MemberNotFound(String),

    /// The member is declared but the entity returned no value for it.
    #[error("Member '{0}' can not be read")]
    MemberNotReadable(String),

    /// The member is declared read-only.
    #[error("Member '{0}' has no setter")]
    MemberNotSettable(String),
}
