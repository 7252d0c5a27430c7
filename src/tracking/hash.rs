//! Signature hashing of entity shapes.
//!
//! A [`ShapeSignature`] condenses everything that determines the behavior of a synthesized
//! tracked type (shape kind, shape name, and each instrumented member's name, declared type and
//! equality mode) into 64 bits. Two proxy types built for the same entity with the same
//! signature behave identically, which is what makes it safe to keep whichever one wins a cache
//! race. The signature also names the proxy type.
//!
//! Components are folded in sequence with FNV-1a style mixing, so order matters and equal
//! components never cancel out.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::{
    entity::{MemberType, ShapeKind},
    tracking::EqualityMode,
};

/// Order-sensitive hash builder over the components of a shape
pub struct ShapeSignature {
    state: u64,
}

impl ShapeSignature {
    /// Create a new signature builder
    #[must_use]
    pub fn new() -> Self {
        ShapeSignature {
            state: 0xcbf2_9ce4_8422_2325_u64, // FNV-1a 64-bit offset basis
        }
    }

    fn mix(&mut self, value: u64) {
        self.state ^= value;
        self.state = self.state.wrapping_mul(0x0100_0000_01b3_u64); // FNV-1a 64-bit prime

        self.state ^= self.state >> 33;
        self.state = self.state.wrapping_mul(0xff51_afd7_ed55_8ccd_u64);
        self.state ^= self.state >> 33;
    }

    /// Add any hashable component
    #[must_use]
    pub fn add_component<T: Hash + ?Sized>(mut self, component: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        component.hash(&mut hasher);
        self.mix(hasher.finish());
        self
    }

    /// Add the shape kind and name
    #[must_use]
    pub fn add_shape(self, kind: ShapeKind, name: &str) -> Self {
        self.add_component(&kind).add_component(name)
    }

    /// Add one instrumented member
    #[must_use]
    pub fn add_member(self, name: &str, member_type: &MemberType, mode: &EqualityMode) -> Self {
        let lifted = match mode {
            EqualityMode::Plain => 0_u8,
            EqualityMode::Lifted { inequality: None } => 1,
            EqualityMode::Lifted { inequality: Some(_) } => 2,
        };
        self.add_component(name)
            .add_component(member_type)
            .add_component(&lifted)
    }

    /// Finish and return the 64-bit signature
    #[must_use]
    pub fn finalize(self) -> u64 {
        self.state
    }
}

impl Default for ShapeSignature {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ValueKind;

    #[test]
    fn test_signature_deterministic() {
        let ty = MemberType::new(ValueKind::String);
        let first = ShapeSignature::new()
            .add_shape(ShapeKind::Class, "Person")
            .add_member("Name", &ty, &EqualityMode::Plain)
            .finalize();
        let second = ShapeSignature::new()
            .add_shape(ShapeKind::Class, "Person")
            .add_member("Name", &ty, &EqualityMode::Plain)
            .finalize();

        assert_eq!(first, second);
    }

    #[test]
    fn test_signature_order_sensitive() {
        let ty = MemberType::new(ValueKind::I4);
        let ab = ShapeSignature::new()
            .add_member("A", &ty, &EqualityMode::Plain)
            .add_member("B", &ty, &EqualityMode::Plain)
            .finalize();
        let ba = ShapeSignature::new()
            .add_member("B", &ty, &EqualityMode::Plain)
            .add_member("A", &ty, &EqualityMode::Plain)
            .finalize();

        assert_ne!(ab, ba);
    }

    #[test]
    fn test_signature_kind_differentiation() {
        let class = ShapeSignature::new()
            .add_shape(ShapeKind::Class, "Person")
            .finalize();
        let interface = ShapeSignature::new()
            .add_shape(ShapeKind::Interface, "Person")
            .finalize();

        assert_ne!(class, interface);
    }

    #[test]
    fn test_signature_member_type_differentiation() {
        let plain = ShapeSignature::new()
            .add_member("Count", &MemberType::new(ValueKind::I4), &EqualityMode::Plain)
            .finalize();
        let optional = ShapeSignature::new()
            .add_member(
                "Count",
                &MemberType::optional(ValueKind::I4),
                &EqualityMode::Lifted { inequality: None },
            )
            .finalize();

        assert_ne!(plain, optional);
    }
}
