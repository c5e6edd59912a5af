//! Session navigation state.
//!
//! The shell is either on the language-selection screen or inside an active
//! tutoring session for exactly one language with one visible feature.

/// The feature surface visible inside an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureTab {
    /// Conversational tutoring chat
    Chat,
    /// Plan-of-the-day checklist
    Plan,
    /// One-shot prompt-to-image practice
    Creative,
}

impl FeatureTab {
    /// Label shown in the tab bar / prompt.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureTab::Chat => "Tutor Chat",
            FeatureTab::Plan => "Daily Plan",
            FeatureTab::Creative => "Creative Practice",
        }
    }
}

/// Navigation state machine.
///
/// Transitions:
/// - `Unselected --select_language--> Active(lang, Chat)`
/// - `Active --set_active_tab--> Active(lang, new_tab)`
/// - `Active --go_back--> Unselected`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No language picked yet; the selector is showing.
    Unselected,
    /// An active tutoring session.
    Active { language: String, tab: FeatureTab },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Unselected
    }
}

impl SessionState {
    /// Starts a session for `language` with the chat tab active.
    pub fn select_language(&mut self, language: impl Into<String>) {
        *self = SessionState::Active {
            language: language.into(),
            tab: FeatureTab::Chat,
        };
    }

    /// Switches the visible feature. Returns `false` (and leaves the state
    /// untouched) when no session is active, since the tab only has meaning
    /// inside one.
    pub fn set_active_tab(&mut self, new_tab: FeatureTab) -> bool {
        match self {
            SessionState::Active { tab, .. } => {
                *tab = new_tab;
                true
            }
            SessionState::Unselected => false,
        }
    }

    /// Ends the session and returns to language selection.
    pub fn go_back(&mut self) {
        *self = SessionState::Unselected;
    }

    /// The active session's language, if any.
    pub fn language(&self) -> Option<&str> {
        match self {
            SessionState::Active { language, .. } => Some(language),
            SessionState::Unselected => None,
        }
    }

    /// The visible feature, if a session is active.
    pub fn active_tab(&self) -> Option<FeatureTab> {
        match self {
            SessionState::Active { tab, .. } => Some(*tab),
            SessionState::Unselected => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active { .. })
    }
}
