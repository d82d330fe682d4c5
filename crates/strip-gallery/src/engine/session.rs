use crate::timeline::TimerHandle;
use crate::viewport::Mode;

/// A lightbox transition whose scheduled phases are still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Expanding,
    Navigating,
    Closing,
}

/// Outer state of the desktop lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Collapsed,
    Expanding,
    Expanded,
    /// Crossfading between two items while staying expanded.
    Navigating,
    Closing,
}

/// Everything the engine mutates, owned by a single [`GalleryEngine`](super::GalleryEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mode: Mode,
    /// Lightbox declared visible. Flips on only after the expand animation window.
    pub expanded: bool,
    /// Item shown in the lightbox; `None` whenever nothing is expanded or expanding.
    pub current_index: Option<usize>,
    /// Highlighted item in mobile mode.
    pub featured_index: usize,
    pub transition: Option<Transition>,
    pub pending_phases: Vec<TimerHandle>,
    pub pending_inertia: Option<TimerHandle>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            mode: Mode::Desktop,
            expanded: false,
            current_index: None,
            featured_index: 0,
            transition: None,
            pending_phases: Vec::new(),
            pending_inertia: None,
        }
    }
}

impl SessionState {
    /// The engine-wide guard: true while any lightbox phase is outstanding.
    pub fn animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn lightbox(&self) -> LightboxState {
        match self.transition {
            Some(Transition::Expanding) => LightboxState::Expanding,
            Some(Transition::Navigating) => LightboxState::Navigating,
            Some(Transition::Closing) => LightboxState::Closing,
            None if self.expanded => LightboxState::Expanded,
            None => LightboxState::Collapsed,
        }
    }

    /// Forget a phase handle that just fired. False means it was already cancelled.
    pub(crate) fn take_phase(&mut self, handle: TimerHandle) -> bool {
        match self.pending_phases.iter().position(|h| *h == handle) {
            Some(pos) => {
                self.pending_phases.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightbox_state_derivation() {
        let mut state = SessionState::default();
        assert_eq!(state.lightbox(), LightboxState::Collapsed);
        assert!(!state.animating());

        state.transition = Some(Transition::Expanding);
        assert_eq!(state.lightbox(), LightboxState::Expanding);
        assert!(state.animating());

        state.transition = None;
        state.expanded = true;
        assert_eq!(state.lightbox(), LightboxState::Expanded);

        state.transition = Some(Transition::Closing);
        assert_eq!(state.lightbox(), LightboxState::Closing);
    }
}
