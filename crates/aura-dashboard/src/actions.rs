// actions.rs — One-click actions offered next to loaded data.
//
// None of these reach the backend; each confirms the action with a success
// or info toast.

use aura_backend::{catalog, RelationshipContact, Suggestion};
use aura_notify::NotificationCenter;
use uuid::Uuid;

pub const ADVISOR_REFERRAL_MESSAGE: &str = "We are connecting you with top-rated advisors!";

#[derive(Clone)]
pub struct QuickActions {
    notifications: NotificationCenter,
}

impl QuickActions {
    pub fn new(notifications: NotificationCenter) -> Self {
        Self { notifications }
    }

    /// Act on a proactive suggestion card.
    pub fn accept_suggestion(&self, suggestion: &Suggestion) -> Uuid {
        tracing::info!(suggestion = %suggestion.id, action = %suggestion.action, "suggestion accepted");
        self.notifications
            .success(catalog::suggestion_action_message(&suggestion.action))
    }

    /// Follow up on a relationship contact's suggestion.
    pub fn reach_out(&self, contact: &RelationshipContact) -> Uuid {
        self.notifications.success(format!(
            "Action for \"{}\" has been initiated.",
            contact.suggestion
        ))
    }

    /// Ask to be put in touch with a financial advisor.
    pub fn request_advisor(&self) -> Uuid {
        self.notifications.info(ADVISOR_REFERRAL_MESSAGE)
    }
}
