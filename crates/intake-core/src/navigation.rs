use tracing::debug;

use crate::{catalog::Catalog, error::CoreError};

/// Sub-state of the navigation position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Normal,
    /// The preview step is displayed on top of the terminal screen.
    ShowingPreview,
    Completed,
}

/// Outcome of a forward navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    Moved { from: usize, to: usize },
    PreviewShown,
    /// The terminal screen was left forward; the caller must run completion
    /// and then call [`Navigator::mark_completed`].
    CompletionRequested,
}

/// Outcome of a backward navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved { from: usize, to: usize },
    PreviewClosed,
    Stayed,
}

/// Cursor over a [`Catalog`]. Assumes the caller already checked the
/// forward-progress gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    cursor: usize,
    last_index: usize,
    has_preview: bool,
    state: NavState,
}

impl Navigator {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            cursor: 0,
            last_index: catalog.last_index(),
            has_preview: catalog.has_preview(),
            state: NavState::Normal,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_showing_preview(&self) -> bool {
        self.state == NavState::ShowingPreview
    }

    pub fn is_completed(&self) -> bool {
        self.state == NavState::Completed
    }

    pub fn is_at_terminal(&self) -> bool {
        self.cursor == self.last_index
    }

    pub fn can_retreat(&self) -> bool {
        match self.state {
            NavState::Normal => self.cursor > 0,
            NavState::ShowingPreview => true,
            NavState::Completed => false,
        }
    }

    pub fn advance(&mut self) -> Result<Forward, CoreError> {
        let transition = match self.state {
            NavState::Completed => return Err(CoreError::FlowCompleted),
            NavState::Normal if self.is_at_terminal() && self.has_preview => {
                self.state = NavState::ShowingPreview;
                Forward::PreviewShown
            }
            _ if self.is_at_terminal() => Forward::CompletionRequested,
            _ => {
                let from = self.cursor;
                self.cursor = (self.cursor + 1).min(self.last_index);
                Forward::Moved {
                    from,
                    to: self.cursor,
                }
            }
        };
        debug!(?transition, cursor = self.cursor, state = ?self.state, "advance");
        Ok(transition)
    }

    /// Steps back one screen. Leaving the preview returns to the terminal
    /// screen and re-arms the preview for the next advance.
    pub fn retreat(&mut self) -> Result<Retreat, CoreError> {
        let transition = match self.state {
            NavState::Completed => return Err(CoreError::FlowCompleted),
            NavState::ShowingPreview => {
                self.state = NavState::Normal;
                Retreat::PreviewClosed
            }
            NavState::Normal if self.cursor > 0 => {
                let from = self.cursor;
                self.cursor -= 1;
                Retreat::Moved {
                    from,
                    to: self.cursor,
                }
            }
            NavState::Normal => Retreat::Stayed,
        };
        debug!(?transition, cursor = self.cursor, state = ?self.state, "retreat");
        Ok(transition)
    }

    pub fn mark_completed(&mut self) {
        self.state = NavState::Completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::{PreviewStep, ScreenDescriptor};

    fn catalog(with_preview: bool) -> Catalog {
        let terminal = ScreenDescriptor::terminal(3, "Done", "All set");
        let mut screens = vec![
            ScreenDescriptor::informational(1, "Welcome", "Hi"),
            ScreenDescriptor::informational(2, "Motivation", "Go"),
        ];
        if with_preview {
            screens.push(terminal.with_preview(PreviewStep::new("Tour", Vec::new())));
            Catalog::new(screens).expect("catalog")
        } else {
            screens.push(terminal);
            Catalog::linear(screens).expect("catalog")
        }
    }

    #[test]
    fn starts_at_first_screen() {
        let nav = Navigator::new(&catalog(true));
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.state(), NavState::Normal);
        assert!(!nav.can_retreat());
    }

    #[test]
    fn retreat_at_start_is_a_no_op() {
        let mut nav = Navigator::new(&catalog(true));
        assert_eq!(nav.retreat().unwrap(), Retreat::Stayed);
        assert_eq!(nav.cursor(), 0);
    }

    #[test]
    fn preview_is_inserted_once_before_completion() {
        let mut nav = Navigator::new(&catalog(true));
        assert_eq!(nav.advance().unwrap(), Forward::Moved { from: 0, to: 1 });
        assert_eq!(nav.advance().unwrap(), Forward::Moved { from: 1, to: 2 });
        assert_eq!(nav.advance().unwrap(), Forward::PreviewShown);
        assert_eq!(nav.cursor(), 2);
        assert!(nav.is_showing_preview());
        assert_eq!(nav.advance().unwrap(), Forward::CompletionRequested);
    }

    #[test]
    fn terminal_without_preview_requests_completion_immediately() {
        let mut nav = Navigator::new(&catalog(false));
        nav.advance().unwrap();
        nav.advance().unwrap();
        assert_eq!(nav.advance().unwrap(), Forward::CompletionRequested);
        assert!(!nav.is_completed());
    }

    #[test]
    fn leaving_preview_rearms_it() {
        let mut nav = Navigator::new(&catalog(true));
        nav.advance().unwrap();
        nav.advance().unwrap();
        nav.advance().unwrap();

        assert_eq!(nav.retreat().unwrap(), Retreat::PreviewClosed);
        assert_eq!(nav.cursor(), 2);
        assert_eq!(nav.state(), NavState::Normal);
        assert_eq!(nav.advance().unwrap(), Forward::PreviewShown);
    }

    #[test]
    fn completed_navigator_rejects_moves() {
        let mut nav = Navigator::new(&catalog(false));
        nav.mark_completed();
        assert!(matches!(nav.advance(), Err(CoreError::FlowCompleted)));
        assert!(matches!(nav.retreat(), Err(CoreError::FlowCompleted)));
        assert!(!nav.can_retreat());
    }
}
