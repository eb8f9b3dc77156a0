//! Profile editor state
//!
//! Everything the edit screen renders, plus the bookkeeping needed to keep
//! late-arriving loads from clobbering user input.

use contractor_model::{
    ContractorProfile, Service, StateEntry, UserBadge, UserId,
};
use serde::Serialize;

/// Long-running action currently blocking the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyReason {
    Saving,
    Uploading,
}

impl BusyReason {
    /// Text for the progress overlay.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saving => "Saving...",
            Self::Uploading => "Uploading...",
        }
    }
}

/// Profile editor state
#[derive(Debug, Clone, Default, Serialize)]
pub struct EditorState {
    /// Account being edited, once resolved
    pub user_id: Option<UserId>,
    /// In-memory form; `phone` may hold the display rendering
    pub form: ContractorProfile,
    /// Service types for the trade selector
    pub services: Vec<Service>,
    /// States for the address selector
    pub states: Vec<StateEntry>,
    pub badge: Option<UserBadge>,
    pub review_count: u32,
    /// Whether activation is still in progress
    pub is_loading: bool,
    pub busy: Option<BusyReason>,
    /// Whether the form has edits that were not persisted yet
    pub is_dirty: bool,

    /// Bumped on every user edit; loads started before a bump are dropped.
    #[serde(skip)]
    generation: u64,
    #[serde(skip)]
    last_cache_stamp: Option<i64>,
    /// Actions currently running, oldest first.
    #[serde(skip)]
    running: Vec<BusyReason>,
}

impl EditorState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record a user edit.
    pub fn mark_dirty(&mut self) {
        self.generation += 1;
        self.is_dirty = true;
    }

    /// Replace the whole form with a loaded record unless the user edited
    /// the form after the load identified by `started_at` began.
    pub fn apply_loaded_profile(
        &mut self,
        started_at: u64,
        profile: ContractorProfile,
    ) -> bool {
        if self.generation != started_at {
            return false;
        }
        self.form = profile;
        self.is_dirty = false;
        true
    }

    /// Mark the current form as persisted.
    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    /// Mark `reason` as running; `busy` shows the most recent action.
    pub fn begin_busy(&mut self, reason: BusyReason) {
        self.running.push(reason);
        self.busy = Some(reason);
    }

    /// Mark one running `reason` as finished. Overlapping actions may end
    /// in any order; `busy` falls back to whatever is still running.
    pub fn end_busy(&mut self, reason: BusyReason) {
        if let Some(index) = self.running.iter().rposition(|r| *r == reason) {
            self.running.remove(index);
        }
        self.busy = self.running.last().copied();
    }

    pub(crate) fn record_cache_stamp(&mut self, stamp: i64) {
        self.last_cache_stamp = Some(stamp);
    }

    pub(crate) fn last_cache_stamp(&self) -> Option<i64> {
        self.last_cache_stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> ContractorProfile {
        ContractorProfile {
            business_name: "Loaded".into(),
            ..Default::default()
        }
    }

    #[test]
    fn load_applies_when_no_edit_happened() {
        let mut state = EditorState::default();
        let started = state.generation();

        assert!(state.apply_loaded_profile(started, loaded()));
        assert_eq!(state.form.business_name, "Loaded");
        assert!(!state.is_dirty);
    }

    #[test]
    fn overlapping_actions_keep_the_form_busy() {
        let mut state = EditorState::default();

        state.begin_busy(BusyReason::Saving);
        state.begin_busy(BusyReason::Uploading);
        assert_eq!(state.busy, Some(BusyReason::Uploading));

        state.end_busy(BusyReason::Saving);
        assert_eq!(state.busy, Some(BusyReason::Uploading));

        state.end_busy(BusyReason::Uploading);
        assert_eq!(state.busy, None);
    }

    #[test]
    fn load_is_dropped_after_an_edit() {
        let mut state = EditorState::default();
        let started = state.generation();

        state.form.business_name = "Typed".into();
        state.mark_dirty();

        assert!(!state.apply_loaded_profile(started, loaded()));
        assert_eq!(state.form.business_name, "Typed");
        assert!(state.is_dirty);
    }
}
