// goal.rs — Goal subcommands: add (decompose + persist), list.

use aura_backend::Goal;
use aura_goal::{Decomposition, EventDispatcher, GoalDecompositionPipeline, LogSink};
use clap::Subcommand;

use crate::app::App;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Break a new goal into steps and add it to your goals.
    Add {
        /// Goal title (e.g., "Learn Spanish").
        title: String,
        /// Mark these steps (1-based) as done after planning.
        #[arg(long, value_delimiter = ',')]
        done: Vec<usize>,
        /// Take the suggested course when the goal is about learning.
        #[arg(long)]
        enroll: bool,
    },
    /// List all goals.
    List,
}

pub async fn execute(cmd: &GoalCommands, app: &App) -> anyhow::Result<()> {
    match cmd {
        GoalCommands::Add {
            title,
            done,
            enroll,
        } => add_goal(app, title, done, *enroll).await,
        GoalCommands::List => list_goals(app).await,
    }
}

async fn add_goal(app: &App, title: &str, done: &[usize], enroll: bool) -> anyhow::Result<()> {
    let mut dispatcher = EventDispatcher::with_tracing();
    dispatcher.add_sink(Box::new(LogSink::new(&app.paths.events_log)));
    let mut pipeline =
        GoalDecompositionPipeline::new(app.backend.clone(), app.notifications.clone(), dispatcher);

    let goal = pipeline.run(title).await?;
    println!("Goal added: {} ({})", goal.title, goal.id);

    for position in done {
        let step = pipeline
            .decomposition()
            .and_then(|plan| position.checked_sub(1).and_then(|i| plan.steps().get(i)))
            .map(|step| step.id);
        match step {
            Some(id) => {
                pipeline.toggle_step(id);
            }
            None => println!("No step {} in the plan.", position),
        }
    }

    if let Some(plan) = pipeline.decomposition() {
        println!();
        print!("{}", render_plan(plan));
        if plan.learning_track() && !enroll {
            println!();
            println!("Tip: a top-rated course is available. Re-run with --enroll to take it.");
        }
    }
    if enroll && pipeline.enroll_in_course().is_none() {
        println!("No course suggestion for this goal.");
    }

    println!();
    print!("{}", render_goals(pipeline.goals()));
    Ok(())
}

async fn list_goals(app: &App) -> anyhow::Result<()> {
    let goals = app.backend.fetch_goals().await?;
    if goals.is_empty() {
        println!("No goals found.");
        return Ok(());
    }
    print!("{}", render_goals(&goals));
    Ok(())
}

pub fn render_plan(plan: &Decomposition) -> String {
    let mut out = format!(
        "Plan for \"{}\" ({}/{} done)\n",
        plan.goal_title(),
        plan.completed_count(),
        plan.steps().len()
    );
    for (i, step) in plan.steps().iter().enumerate() {
        let mark = if step.completed { "x" } else { " " };
        out.push_str(&format!("  [{}] {}. {}\n", mark, i + 1, step.description));
    }
    out
}

pub fn render_goals(goals: &[Goal]) -> String {
    let mut out = format!("{:<28} {:<10} {:>8}\n", "TITLE", "CATEGORY", "PROGRESS");
    out.push_str(&format!("{}\n", "-".repeat(48)));
    for goal in goals {
        out.push_str(&format!(
            "{:<28} {:<10} {:>7}%\n",
            goal.title,
            goal.category.to_string(),
            goal.progress
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_backend::{catalog, GoalStep, NewGoal};

    #[test]
    fn plan_marks_completed_steps() {
        let steps = catalog::DECOMPOSITION_STEPS.iter().map(|d| GoalStep::new(*d)).collect();
        let mut plan = Decomposition::new("Learn Spanish", steps);
        let first = plan.steps()[0].id;
        plan.toggle_step(first);

        let text = render_plan(&plan);
        assert!(text.starts_with("Plan for \"Learn Spanish\" (1/6 done)"));
        assert!(text.contains("  [x] 1. Define clear, measurable objectives for the goal."));
        assert!(text.contains("  [ ] 6. Set up a weekly review to track progress."));
    }

    #[test]
    fn goal_table_lists_every_goal() {
        let goals: Vec<Goal> = catalog::seed_goals()
            .into_iter()
            .map(|(request, _)| Goal::new(request))
            .chain(std::iter::once(Goal::new(NewGoal::from_title("Learn Spanish"))))
            .collect();
        let text = render_goals(&goals);
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("Learn Spanish"));
        assert!(text.contains("Skills"));
    }
}
