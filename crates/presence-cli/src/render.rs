//! Plain-text rendering of page snapshots

use presence_core::view::ShapePanel;
use presence_core::{PageView, WeeklyTrajectory};
use std::fmt::Write;

pub(crate) fn page(view: &PageView) -> String {
    let mut out = String::new();
    let _ = write_page(&mut out, view);
    out
}

fn write_page(out: &mut String, view: &PageView) -> std::fmt::Result {
    match view {
        PageView::Dashboard { scenarios } => {
            writeln!(out, "Scenarios")?;
            for s in scenarios {
                writeln!(out, "  {:<20} {} ({} attempts)", s.key.as_str(), s.title, s.attempts)?;
                writeln!(out, "  {:<20} {}", "", s.chips.join(" · "))?;
            }
        }
        PageView::Overview {
            title,
            summary,
            chips,
            kpis,
            client_role,
            opening_line,
            tip,
        } => {
            writeln!(out, "# {title}")?;
            writeln!(out, "{summary}")?;
            writeln!(out, "[{}]", chips.join("] ["))?;
            for kpi in kpis {
                writeln!(out, "  {}: {}", kpi.title, kpi.value)?;
            }
            writeln!(out, "{client_role}: \"{opening_line}\"")?;
            writeln!(out, "Tip: {tip}")?;
        }
        PageView::Brief { title, brief } => {
            writeln!(out, "# {title} - brief")?;
            writeln!(out, "{}", brief.context)?;
            writeln!(out, "  Objective:   {}", brief.objective)?;
            writeln!(out, "  Stakeholder: {}", brief.stakeholder)?;
            writeln!(out, "  Timebox:     {}", brief.timebox)?;
            writeln!(out, "  Assessment:  {}", brief.assessment)?;
            writeln!(out, "  Try saying:  {}", brief.sample_prompt)?;
        }
        PageView::Baseline {
            client_role,
            script,
            journey,
        } => {
            writeln!(out, "{}", journey.join(" -> "))?;
            writeln!(out, "{}", script.instructions)?;
            writeln!(out, "{client_role}: \"{}\"", script.client_line)?;
            writeln!(out, "Guidance: {}", script.guidance)?;
        }
        PageView::Coaching { script } => {
            writeln!(out, "{}", script.summary)?;
            writeln!(out, "Nudge: {}", script.nudge)?;
            for p in &script.prompts {
                writeln!(out, "  - {p}")?;
            }
        }
        PageView::Feedback {
            scale,
            presence,
            stage,
        } => {
            writeln!(out, "Scores {}..{} step {}", scale.min, scale.max, scale.step)?;
            write_panel(out, presence)?;
            write_panel(out, stage)?;
        }
        PageView::Learning { modules } => {
            for m in modules {
                writeln!(out, "* {}: {}", m.title, m.description)?;
            }
        }
        PageView::ReSimulation {
            client_role,
            script,
        } => {
            writeln!(out, "{}", script.instructions)?;
            writeln!(out, "{client_role}: \"{}\"", script.cue)?;
            writeln!(out, "What good looks like: {}", script.what_good_looks_like)?;
        }
        PageView::Growth {
            trajectory,
            export_available,
        } => {
            out.push_str(&trajectory_table(trajectory));
            if !export_available {
                writeln!(out, "(report export is not available)")?;
            }
        }
    }
    Ok(())
}

fn write_panel(out: &mut String, panel: &ShapePanel) -> std::fmt::Result {
    writeln!(out, "{} [{}]", panel.shape, panel.labels.join(", "))?;
    for a in &panel.attempts {
        let values: Vec<String> = a.committed.iter().map(|v| format!("{v:.1}")).collect();
        writeln!(
            out,
            "  {:<28} {}  mean {:.2}",
            a.caption,
            values.join(" "),
            a.composite
        )?;
    }
    Ok(())
}

pub(crate) fn trajectory_table(t: &WeeklyTrajectory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:>9} {:>9}", "week", "baseline", "actual");
    for (week, baseline, actual) in t.rows() {
        let _ = writeln!(out, "{week:<8} {baseline:>9.3} {actual:>9.3}");
    }
    let _ = writeln!(out, "gain {:+.3}", t.gain());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_core::{GrowthProjector, SessionState};

    #[test]
    fn dashboard_lists_every_scenario() {
        let session = SessionState::new();
        let text = page(&session.current_view().unwrap());
        assert!(text.starts_with("Scenarios\n"));
        assert!(text.contains("board-update"));
        assert!(text.contains("client-negotiation"));
    }

    #[test]
    fn trajectory_table_has_row_per_week() {
        let t = GrowthProjector::default().project_composites(5.26, 8.24);
        let table = trajectory_table(&t);
        assert_eq!(table.lines().count(), 1 + 6 + 1);
        assert!(table.contains("Week 1"));
        assert!(table.contains("gain +2.980"));
    }
}
