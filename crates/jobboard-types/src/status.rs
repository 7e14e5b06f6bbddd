use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of an application.
///
/// The usual path is `Applied -> Seen -> Interviewing -> Offered`, with
/// `Rejected` as the other outcome. Employer actions are gated only by the
/// current status: an action is unavailable when the application already has
/// its target status. Terminal states are not hard-blocked, so
/// `Offered -> Rejected` and `Rejected -> Interviewing` are both allowed.
/// Values the client does not know decode to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Seen,
    Interviewing,
    Offered,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    /// No further employer action is offered from these states.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Offered | Self::Rejected)
    }

    pub fn badge(self) -> StatusBadge {
        let (label, tone) = match self {
            Self::Applied => ("submitted", Tone::Info),
            Self::Seen => ("viewed", Tone::Warning),
            Self::Interviewing => ("interview", Tone::Primary),
            Self::Offered => ("offer", Tone::Success),
            Self::Rejected => ("rejected", Tone::Error),
            Self::Unknown => ("unknown", Tone::Neutral),
        };
        StatusBadge { label, tone }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Applied => "Applied",
            Self::Seen => "Seen",
            Self::Interviewing => "Interviewing",
            Self::Offered => "Offered",
            Self::Rejected => "Rejected",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Colour class a status badge is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warning,
    Primary,
    Success,
    Error,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: Tone,
}

/// Status changes an employer can trigger from the applications list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusAction {
    MoveToInterviewing,
    MakeOffer,
    Reject,
}

impl StatusAction {
    pub const ALL: [StatusAction; 3] = [Self::MoveToInterviewing, Self::MakeOffer, Self::Reject];

    pub fn target(self) -> ApplicationStatus {
        match self {
            Self::MoveToInterviewing => ApplicationStatus::Interviewing,
            Self::MakeOffer => ApplicationStatus::Offered,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }

    /// An action is a no-op when the application is already in its target state.
    pub fn applies_to(self, current: ApplicationStatus) -> bool {
        current != self.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_mapping() {
        assert_eq!(ApplicationStatus::Applied.badge(), StatusBadge { label: "submitted", tone: Tone::Info });
        assert_eq!(ApplicationStatus::Seen.badge().tone, Tone::Warning);
        assert_eq!(ApplicationStatus::Interviewing.badge().label, "interview");
        assert_eq!(ApplicationStatus::Offered.badge().tone, Tone::Success);
        assert_eq!(ApplicationStatus::Rejected.badge().label, "rejected");
        assert_eq!(ApplicationStatus::Unknown.badge().tone, Tone::Neutral);
    }

    #[test]
    fn unknown_wire_value_decodes_to_unknown() {
        let status: ApplicationStatus = serde_json::from_str("\"Archived\"").unwrap();
        assert_eq!(status, ApplicationStatus::Unknown);
    }

    #[test]
    fn action_disabled_only_on_its_own_target() {
        assert!(!StatusAction::MoveToInterviewing.applies_to(ApplicationStatus::Interviewing));
        assert!(StatusAction::MakeOffer.applies_to(ApplicationStatus::Interviewing));
        assert!(StatusAction::Reject.applies_to(ApplicationStatus::Applied));
        assert!(!StatusAction::Reject.applies_to(ApplicationStatus::Rejected));
    }

    #[test]
    fn terminal_states_still_accept_other_actions() {
        assert!(StatusAction::Reject.applies_to(ApplicationStatus::Offered));
        assert!(StatusAction::MoveToInterviewing.applies_to(ApplicationStatus::Rejected));
    }

    #[test]
    fn terminal_states() {
        assert!(ApplicationStatus::Offered.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(!ApplicationStatus::Seen.is_terminal());
    }
}
