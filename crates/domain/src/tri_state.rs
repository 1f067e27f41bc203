use serde::{Deserialize, Serialize};

/// Rendering state of a "select all" control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriState {
    /// Every member is selected.
    pub checked: bool,
    /// Some, but not all, members are selected.
    pub indeterminate: bool,
}

impl TriState {
    /// Nothing selected, or nothing to select.
    pub const OFF: Self = Self {
        checked: false,
        indeterminate: false,
    };

    /// Everything selected.
    pub const ALL: Self = Self {
        checked: true,
        indeterminate: false,
    };

    /// Partially selected.
    pub const SOME: Self = Self {
        checked: false,
        indeterminate: true,
    };
}

/// Derives the tri-state summary from selection counts.
///
/// An empty universe always renders as off, never as checked.
#[must_use]
pub fn tri_state(selected_count: usize, total_count: usize) -> TriState {
    if total_count == 0 || selected_count == 0 {
        return TriState::OFF;
    }

    if selected_count >= total_count {
        return TriState::ALL;
    }

    TriState::SOME
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{TriState, tri_state};

    #[test]
    fn boundaries() {
        assert_eq!(tri_state(0, 5), TriState::OFF);
        assert_eq!(tri_state(5, 5), TriState::ALL);
        assert_eq!(tri_state(2, 5), TriState::SOME);
        assert_eq!(tri_state(0, 0), TriState::OFF);
    }

    #[test]
    fn empty_universe_is_never_checked() {
        assert_eq!(tri_state(3, 0), TriState::OFF);
    }

    proptest! {
        #[test]
        fn checked_and_indeterminate_are_exclusive(selected in 0usize..64, total in 0usize..64) {
            let state = tri_state(selected.min(total), total);
            prop_assert!(!(state.checked && state.indeterminate));
            prop_assert_eq!(state.checked, total > 0 && selected >= total);
        }
    }
}
