//! The tracking contract shared by every tracked type.
//!
//! Whatever the entity shape, a tracked instance exposes the same two things: a single dirty flag
//! and a map from member name to the value the member held when tracking began for it. The
//! [`ChangeTracking`] trait is that surface; [`ChangeState`] is the storage behind it.
//!
//! The baseline map is allocated lazily, on the first write to a trackable member, so an instance
//! that was never written reports no baseline at all. Allocation goes through
//! [`ChangeState::ensure_baseline`], which is idempotent. Writes require exclusive access to the
//! instance, which makes the first allocation race-free without further locking.

use std::collections::HashMap;

use crate::entity::Value;

/// Member name to baseline value
pub type Baseline = HashMap<String, Value>;

/// The uniform change-tracking surface of a tracked instance
///
/// A persistence layer reads this after a unit of work to decide whether, and from what, an
/// entity changed. The surface is read-only; it offers no way to reset tracking.
pub trait ChangeTracking {
    /// True iff a write to a trackable member changed its value after its baseline was recorded
    fn is_modified(&self) -> bool;

    /// The baseline map, `None` until the first write to any trackable member
    fn baseline(&self) -> Option<&Baseline>;

    /// The baseline value of a single member, if one was recorded
    fn original_value(&self, member: &str) -> Option<&Value> {
        self.baseline().and_then(|baseline| baseline.get(member))
    }

    /// Names of all members that have a recorded baseline
    fn tracked_member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .baseline()
            .map(|baseline| baseline.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}

/// Dirty flag and lazily allocated baseline map of one tracked instance
#[derive(Debug, Clone, Default)]
pub struct ChangeState {
    modified: bool,
    baseline: Option<Baseline>,
}

impl ChangeState {
    /// A fresh state: not modified, no baseline storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the baseline map if needed and return it
    pub fn ensure_baseline(&mut self) -> &mut Baseline {
        self.baseline.get_or_insert_with(Baseline::new)
    }

    /// Returns true if a baseline has been recorded for `member`
    #[must_use]
    pub fn has_baseline(&self, member: &str) -> bool {
        self.baseline
            .as_ref()
            .is_some_and(|baseline| baseline.contains_key(member))
    }

    /// Record the baseline of `member` unless it already has one
    ///
    /// Returns true if the value was recorded.
    pub fn record_baseline(&mut self, member: &str, value: Value) -> bool {
        let baseline = self.ensure_baseline();
        if baseline.contains_key(member) {
            return false;
        }
        baseline.insert(member.to_string(), value);
        true
    }

    pub(crate) fn mark_modified(&mut self) {
        self.modified = true;
    }
}

impl ChangeTracking for ChangeState {
    fn is_modified(&self) -> bool {
        self.modified
    }

    fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = ChangeState::new();

        assert!(!state.is_modified());
        assert!(state.baseline().is_none());
        assert!(state.original_value("Name").is_none());
        assert!(state.tracked_member_names().is_empty());
    }

    #[test]
    fn test_ensure_baseline_is_idempotent() {
        let mut state = ChangeState::new();
        state.ensure_baseline().insert("A".to_string(), Value::I4(1));
        state.ensure_baseline();

        assert_eq!(state.baseline().map(Baseline::len), Some(1));
    }

    #[test]
    fn test_record_baseline_once() {
        let mut state = ChangeState::new();

        assert!(state.record_baseline("Name", Value::from("Hello")));
        assert!(!state.record_baseline("Name", Value::from("World")));
        assert!(state.has_baseline("Name"));
        assert!(!state.has_baseline("Other"));
        assert_eq!(state.original_value("Name"), Some(&Value::from("Hello")));
        assert!(!state.is_modified());
    }

    #[test]
    fn test_tracked_member_names_sorted() {
        let mut state = ChangeState::new();
        state.record_baseline("b", Value::None);
        state.record_baseline("a", Value::None);

        assert_eq!(state.tracked_member_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_mark_modified() {
        let mut state = ChangeState::new();
        state.mark_modified();
        assert!(state.is_modified());
    }
}
