// integration.rs — Integration subcommands: list, connect, disconnect.

use aura_settings::{integrations, IntegrationCategory, IntegrationStatus};
use clap::Subcommand;

use crate::app::App;

#[derive(Subcommand)]
pub enum IntegrationCommands {
    /// List connectable services by category.
    List,
    /// Store an API key for a service.
    Connect {
        /// Integration id (e.g., "google", "oura").
        id: String,
        /// API key or token.
        key: String,
    },
    /// Forget the stored key for a service.
    Disconnect {
        id: String,
    },
}

pub fn execute(cmd: &IntegrationCommands, app: &App) -> anyhow::Result<()> {
    match cmd {
        IntegrationCommands::List => {
            print!("{}", render(&app.settings.integrations()?));
        }
        IntegrationCommands::Connect { id, key } => {
            if integrations::find(id).is_none() {
                tracing::warn!(integration = %id, "not a known integration");
            }
            app.settings.connect(id, key)?;
        }
        IntegrationCommands::Disconnect { id } => {
            app.settings.disconnect(id)?;
        }
    }
    Ok(())
}

pub fn render(statuses: &[IntegrationStatus]) -> String {
    let categories = [
        IntegrationCategory::Productivity,
        IntegrationCategory::Health,
        IntegrationCategory::Finance,
    ];
    let mut out = String::new();
    for category in categories {
        out.push_str(&format!("{}\n", category));
        for status in statuses.iter().filter(|s| s.integration.category == category) {
            let mark = if status.connected { "connected" } else { "-" };
            out.push_str(&format!(
                "  {:<10} {:<18} {}\n",
                status.integration.id, status.integration.name, mark
            ));
        }
    }
    out
}
