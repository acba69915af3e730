// integrations.rs — The third-party services a user can connect.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IntegrationCategory {
    Productivity,
    Health,
    Finance,
}

impl fmt::Display for IntegrationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationCategory::Productivity => write!(f, "Productivity"),
            IntegrationCategory::Health => write!(f, "Health"),
            IntegrationCategory::Finance => write!(f, "Finance"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Integration {
    pub id: &'static str,
    pub name: &'static str,
    pub category: IntegrationCategory,
}

/// Name used in toasts for ids outside the catalog.
pub const FALLBACK_NAME: &str = "Integration";

pub static INTEGRATIONS: [Integration; 7] = [
    Integration {
        id: "google",
        name: "Google Workspace",
        category: IntegrationCategory::Productivity,
    },
    Integration {
        id: "outlook",
        name: "Microsoft Outlook",
        category: IntegrationCategory::Productivity,
    },
    Integration {
        id: "apple",
        name: "Apple Calendar",
        category: IntegrationCategory::Productivity,
    },
    Integration {
        id: "slack",
        name: "Slack",
        category: IntegrationCategory::Productivity,
    },
    Integration {
        id: "oura",
        name: "Oura Ring",
        category: IntegrationCategory::Health,
    },
    Integration {
        id: "myfitnesspal",
        name: "MyFitnessPal",
        category: IntegrationCategory::Health,
    },
    Integration {
        id: "mint",
        name: "Mint",
        category: IntegrationCategory::Finance,
    },
];

pub fn find(id: &str) -> Option<&'static Integration> {
    INTEGRATIONS.iter().find(|integration| integration.id == id)
}

/// Display name for `id`, or [`FALLBACK_NAME`].
pub fn display_name(id: &str) -> &'static str {
    find(id).map_or(FALLBACK_NAME, |integration| integration.name)
}

pub fn by_category(category: IntegrationCategory) -> impl Iterator<Item = &'static Integration> {
    INTEGRATIONS
        .iter()
        .filter(move |integration| integration.category == category)
}
