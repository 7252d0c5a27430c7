//! Synthesis configuration
//!
//! Controls the optional checks that run before a tracked type is built for an entity shape.
//! Structural checks are not configurable and always run: duplicate member names, sealed classes
//! and interface members that are not publicly accessible are synthesis failures.

/// Configuration for the optional checks performed while synthesizing a tracked type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Read a default instance back: every declared member must be readable and yield a value its
    /// declared type accepts
    pub validate_members: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            validate_members: true,
        }
    }
}

impl SynthesisConfig {
    /// Creates a configuration with every optional check disabled
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            validate_members: false,
        }
    }

    /// Creates a configuration with all checks enabled
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }
}
