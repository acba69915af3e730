// automation.rs — Automation subcommands: list, toggle.

use aura_backend::Automation;
use aura_settings::AutomationBoard;
use clap::Subcommand;

use crate::app::App;

#[derive(Subcommand)]
pub enum AutomationCommands {
    /// List automations and whether they are on.
    List,
    /// Flip one or more automations on/off (e.g., `toggle auto1 auto3`).
    Toggle {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

pub async fn execute(cmd: &AutomationCommands, app: &App) -> anyhow::Result<()> {
    let board = AutomationBoard::new(app.notifications.clone());
    board.load(app.backend.as_ref()).await?;

    match cmd {
        AutomationCommands::List => {}
        AutomationCommands::Toggle { ids } => {
            for id in ids {
                board.toggle(id)?;
            }
        }
    }
    print!("{}", render(&board.list()?));
    Ok(())
}

pub fn render(automations: &[Automation]) -> String {
    let mut out = String::new();
    for automation in automations {
        let status = if automation.enabled { "on " } else { "off" };
        out.push_str(&format!(
            "{:<6} [{}] {}\n       {}\n",
            automation.id, status, automation.title, automation.description
        ));
    }
    out
}
