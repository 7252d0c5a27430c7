//! # chic-tracking Prelude
//!
//! The types needed to declare entities and work with tracked instances. Import this module to
//! get all of them at once.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all chic-tracking operations
pub use crate::Error;

/// The result type used throughout chic-tracking
pub use crate::Result;

/// Checks applied when a tracked type is synthesized
pub use crate::SynthesisConfig;

// ================================================================================================
// Entities
// ================================================================================================

/// Declares an entity struct and its shape
pub use crate::entity;

pub use crate::entity::{
    AccessorFlags, DateTime, DateTimeKind, Decimal, Entity, EntityShape, MemberAccess,
    MemberDescriptor, MemberType, MemberValue, ObjectRef, ShapeFlags, ShapeKind, TimeSpan, Value,
    ValueKind,
};

// ================================================================================================
// Tracking
// ================================================================================================

pub use crate::tracking::{
    Baseline, ChangeTracking, EqualityMode, ProxyGenerator, ProxyRegistry, ProxyType,
    ProxyTypeRc, Tracked,
};

/// Shared pointer used by the registry and for object members
pub use std::sync::Arc;
