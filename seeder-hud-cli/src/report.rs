//! Report generation
//!
//! Renders a replay as a plain-text log of redraws or as JSON.

use crate::config::OutputFormat;
use crate::replay::ReplayReport;
use anyhow::Result;
use chrono::Utc;
use seeder_hud::Dispatch;
use serde::Serialize;
use std::fmt::Write;

/// Render a report in the requested format
pub fn render(report: &ReplayReport, scenario: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(render_txt(report, scenario)),
        OutputFormat::Json => render_json(report, scenario),
    }
}

/// Plain-text report; quiet ticks are collapsed into one line each
pub fn render_txt(report: &ReplayReport, scenario: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "═══════════════════════════════════════════════");
    let _ = writeln!(out, "  Seeder HUD Replay - {}", scenario);
    let _ = writeln!(out, "  Generated {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "═══════════════════════════════════════════════\n");

    for tick in &report.ticks {
        if !tick.attached {
            let _ = writeln!(out, "Tick {:>4}: (no vehicle)", tick.tick);
        } else if tick.mutations.is_empty() && tick.commands.is_empty() {
            let _ = writeln!(out, "Tick {:>4}: no changes", tick.tick);
            continue;
        } else {
            let _ = writeln!(out, "Tick {:>4}:", tick.tick);
        }

        for outcome in &tick.commands {
            let result = match outcome.dispatch {
                Some(Dispatch::Forwarded) => "forwarded".to_string(),
                Some(Dispatch::Ignored(reason)) => format!("ignored ({})", reason),
                None => "dropped".to_string(),
            };
            let _ = writeln!(out, "  > {:?}: {}", outcome.command, result);
        }
        for mutation in &tick.mutations {
            let _ = writeln!(out, "  {}", mutation);
        }
    }

    let summary = &report.summary;
    let _ = writeln!(out, "\n───────────────────────────────────────────────");
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Ticks:            {}", summary.ticks);
    let _ = writeln!(out, "  Mutations:        {}", summary.total_mutations);
    let _ = writeln!(out, "  Quiet ticks:      {}", summary.quiet_ticks);
    let _ = writeln!(out, "  Ignored commands: {}", summary.ignored_commands);
    let state = &summary.final_state;
    let _ = writeln!(
        out,
        "  Final state:      shutoff {}, tram lines {} ({}), lane {}",
        state.shutoff_mode,
        if state.tram_lines_active { "on" } else { "off" },
        state.tram_line_mode,
        state.current_lane
    );

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scenario: &'a str,
    generated_at: String,
    #[serde(flatten)]
    report: &'a ReplayReport,
}

/// JSON report with a generation timestamp
pub fn render_json(report: &ReplayReport, scenario: &str) -> Result<String> {
    let json = JsonReport {
        scenario,
        generated_at: Utc::now().to_rfc3339(),
        report,
    };
    Ok(serde_json::to_string_pretty(&json)?)
}
