use anyhow::Result;
use colored::Colorize;
use sadari_game::GameResult;
use std::io::Write;
use std::time::Duration;

use crate::render::ladder_lines;
use crate::verify::VerifyResult;

pub fn write_game_console<W: Write + ?Sized>(
    out: &mut W,
    result: &GameResult,
    highlight: Option<usize>,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🪜 Ladder".bright_cyan().bold())?;
    writeln!(out, "{}", "=========".cyan())?;
    if let Some(seed) = result.seed {
        writeln!(out, "Seed: {seed}")?;
    }
    if let Some(record) = highlight.and_then(|start| result.players.get(start)) {
        writeln!(out, "Path: {}", record.name.bold())?;
    }
    writeln!(out)?;
    for line in ladder_lines(result, highlight) {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "🎯 Results".bright_yellow().bold())?;
    writeln!(out, "{}", "==========".yellow())?;
    for record in &result.players {
        let label = if record.is_winner() {
            record.reward_label().green().bold()
        } else {
            record.reward_label().dimmed()
        };
        writeln!(
            out,
            "{} ({} → {}): {}",
            record.name.bold(),
            record.start_column + 1,
            record.end_column + 1,
            label
        )?;
    }
    Ok(())
}

pub fn write_game_json<W: Write + ?Sized>(out: &mut W, result: &GameResult) -> Result<()> {
    let json_output = serde_json::to_string_pretty(result)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn write_game_markdown<W: Write + ?Sized>(
    out: &mut W,
    result: &GameResult,
    highlight: Option<usize>,
) -> Result<()> {
    writeln!(out, "# Ladder Game Result\n")?;
    if let Some(seed) = result.seed {
        writeln!(out, "- **Seed**: {seed}")?;
    }
    writeln!(out, "- **Players**: {}", result.players.len())?;
    writeln!(out, "- **Winners**: {}\n", result.winners().count())?;

    writeln!(out, "## Ladder\n")?;
    writeln!(out, "```text")?;
    for line in ladder_lines(result, highlight) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "```\n")?;

    writeln!(out, "## Players\n")?;
    writeln!(out, "| Player | Start | End | Reward |")?;
    writeln!(out, "|--------|-------|-----|--------|")?;
    for record in &result.players {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            record.name,
            record.start_column + 1,
            record.end_column + 1,
            record.reward_label()
        )?;
    }
    Ok(())
}

pub fn write_verify_console<W: Write + ?Sized>(
    out: &mut W,
    results: &[VerifyResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Ladder Verification Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Player counts: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {} players", status, result.players.to_string().bold())?;
        writeln!(
            out,
            "   Trials: {}/{} successful",
            result.successful_trials, result.trials_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }
    Ok(())
}

pub fn write_verify_json<W: Write + ?Sized>(out: &mut W, results: &[VerifyResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn write_verify_markdown<W: Write + ?Sized>(
    out: &mut W,
    results: &[VerifyResult],
) -> Result<()> {
    writeln!(out, "# Ladder Verification Results\n")?;
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "- **Player counts**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}\n", total - passed)?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {} players\n", result.players)?;
        writeln!(
            out,
            "- **Trials**: {}/{} successful",
            result.successful_trials, result.trials_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
