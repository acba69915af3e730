// dashboard.rs — Load and print the dashboard.

use aura_dashboard::DashboardView;

use crate::app::{interrupt_token, App};

pub async fn execute(
    app: &App,
    strict: bool,
    accept: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let loader = app.dashboard_loader();
    let cancel = interrupt_token();

    let view = if strict {
        loader.load_strict(&cancel).await?
    } else {
        let report = loader.load(&cancel).await;
        for failure in &report.failed {
            tracing::warn!(source = %failure.key, attempts = failure.attempts, cause = %failure.cause, "section unavailable");
        }
        report.view
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render(&view));
    }

    if let Some(position) = accept {
        let suggestion = view
            .suggestions
            .as_deref()
            .and_then(|s| position.checked_sub(1).and_then(|i| s.get(i)))
            .ok_or_else(|| anyhow::anyhow!("no suggestion at position {}", position))?;
        app.quick_actions().accept_suggestion(suggestion);
    }

    Ok(())
}

/// Plain-text dashboard. Sections that failed to load say so.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str("Suggestions\n");
    match &view.suggestions {
        Some(suggestions) => {
            for (i, s) in suggestions.iter().enumerate() {
                out.push_str(&format!("  {}. {} [{}]\n     {}\n", i + 1, s.title, s.action, s.description));
            }
        }
        None => out.push_str("  (unavailable)\n"),
    }

    out.push_str("\nGoals\n");
    match &view.goals {
        Some(goals) => {
            for goal in goals {
                out.push_str(&format!("  {:<28} {:>3}%  {}\n", goal.title, goal.progress, goal.category));
            }
        }
        None => out.push_str("  (unavailable)\n"),
    }

    out.push_str("\nWellness insight\n");
    match &view.wellness_insight {
        Some(insight) => out.push_str(&format!("  {}\n", insight)),
        None => out.push_str("  (unavailable)\n"),
    }

    out.push_str("\nToday\n");
    match &view.schedule {
        Some(items) => {
            for item in items {
                out.push_str(&format!("  {:<9} {}\n", item.time, item.title));
            }
        }
        None => out.push_str("  (unavailable)\n"),
    }

    out
}
