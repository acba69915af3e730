// session.rs — Session subcommands: status, onboard, logout.
//
// The session flag lives only for the current process, so every invocation
// starts signed out; `status` enters the session to show which screen the
// app would open.

use aura_settings::Screen;
use clap::Subcommand;

use crate::app::App;

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Show onboarding state, connected services, and the start screen.
    Status,
    /// Mark onboarding complete.
    Onboard,
    /// Enter and leave a session.
    Logout,
}

pub fn execute(cmd: &SessionCommands, app: &App) -> anyhow::Result<()> {
    match cmd {
        SessionCommands::Status => {
            let before = app.settings.initial_screen()?;
            app.settings.enter_session()?;
            let after = app.settings.initial_screen()?;
            let document = app.settings.document()?;

            println!("Settings:   {}", app.paths.settings.display());
            println!("Onboarded:  {}", document.onboarding_complete);
            println!("Connected:  {}", document.api_keys.len());
            println!("Start:      {} → {}", before, after);
        }
        SessionCommands::Onboard => {
            app.settings.enter_session()?;
            if app.settings.initial_screen()? == Screen::Dashboard {
                println!("Onboarding is already complete.");
            } else {
                app.settings.complete_onboarding()?;
            }
        }
        SessionCommands::Logout => {
            app.settings.enter_session()?;
            app.settings.log_out()?;
            println!("Start:      {}", app.settings.initial_screen()?);
        }
    }
    Ok(())
}
