// wellness.rs — Wellness view: metrics and insight, loaded together.

use aura_dashboard::WellnessView;

use crate::app::{interrupt_token, App};

pub async fn execute(app: &App, json: bool) -> anyhow::Result<()> {
    let cancel = interrupt_token();
    let view = app.dashboard_loader().load_wellness(&cancel).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render(&view));
    }
    Ok(())
}

pub fn render(view: &WellnessView) -> String {
    let s = &view.snapshot;
    let mut out = format!(
        "Sleep    {:.1}h (quality {}%)\nActivity {} / {} steps ({}%)\nStress   {} ({:?})\n",
        s.sleep.hours,
        s.sleep.quality,
        s.activity.steps,
        s.activity.goal,
        s.activity_percent(),
        s.stress.level,
        s.stress.trend
    );
    if let Some(avg) = s.average_sleep() {
        out.push_str(&format!("Weekly average sleep {:.1}h\n", avg));
    }
    out.push_str("\n  day  sleep   steps\n");
    for (sleep, steps) in s.weekly_sleep.iter().zip(&s.weekly_activity) {
        out.push_str(&format!("  {:<4} {:>5.1} {:>7}\n", sleep.day, sleep.hours, steps.steps));
    }
    out.push_str(&format!("\n{}\n", view.insight));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_backend::catalog;

    #[test]
    fn render_has_one_row_per_day() {
        let view = WellnessView {
            snapshot: catalog::wellness_snapshot(),
            insight: catalog::WELLNESS_INSIGHT.to_string(),
        };
        let text = render(&view);
        assert!(text.starts_with("Sleep    5.5h (quality 78%)"));
        assert!(text.contains("Weekly average sleep 6.9h"));
        assert_eq!(text.lines().filter(|l| l.starts_with("  ") && !l.contains("day")).count(), 7);
        assert!(text.ends_with(&format!("{}\n", catalog::WELLNESS_INSIGHT)));
    }
}
