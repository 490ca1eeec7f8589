use crate::game::outcome::Outcome;
use crate::session::{BotSession, RoundReport};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ReportRow {
    bot: String,
    rounds: String,
    wins: String,
    #[tabled(rename = "moves learned")]
    moves: String,
    #[tabled(rename = "win %")]
    win_rate: String,
}

pub fn display_round(bot: &str, report: &RoundReport) {
    let verdict = match report.outcome {
        Outcome::BotWins => "won".red().bold(),
        Outcome::Draw => "drew".yellow(),
        Outcome::PlayerWins => "lost".green().bold(),
    };
    println!(
        "{} {} ({} vs your {})",
        bot.cyan(),
        verdict,
        report.bot_move,
        report.player_move
    );
}

pub fn display_invalid_move(token: &str) {
    println!("{}", format!("{} is not an acceptable move!", token).yellow());
}

pub fn display_report(sessions: &[BotSession]) {
    println!("\n{}", "🤖 Bot Report".bold().cyan());
    println!("{}\n", "=".repeat(40).cyan());

    let rows: Vec<ReportRow> = sessions
        .iter()
        .map(|session| {
            let tally = session.tally();
            let win_rate = match tally.win_rate() {
                Some(rate) => format!("{:.1}%", rate * 100.0),
                None => "n/a".to_string(),
            };
            ReportRow {
                bot: session.name().to_string(),
                rounds: tally.total_rounds.to_string(),
                wins: tally.wins.to_string(),
                moves: session.history().len().to_string(),
                win_rate,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    for session in sessions.iter().filter(|s| s.persistence_degraded()) {
        println!(
            "{} {} history may not have been saved",
            "⚠️".yellow(),
            session.name()
        );
    }

    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", "⚠️".yellow(), message);
}
