use crate::analysis::champion_stats::ChampionAggregate;
use crate::analysis::match_record::MatchRecord;
use crate::analysis::ranked::{RankedProfile, RankedStats};
use crate::analysis::role_stats::RoleAggregate;
use crate::coaching::AdviceSections;
use crate::lookup::ProfileReport;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    champion: String,
    role: String,
    result: String,
    kda: String,
    cs: String,
    minutes: String,
}

#[derive(Tabled)]
struct ChampionRow {
    champion: String,
    games: String,
    win_rate: String,
    kda: String,
    #[tabled(rename = "k / d / a")]
    averages: String,
    cs_per_min: String,
}

#[derive(Tabled)]
struct RoleRow {
    role: String,
    games: String,
    share: String,
    win_rate: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

fn rank_text(profile: Option<&RankedProfile>) -> ColoredString {
    match profile {
        Some(p) => p.to_string().bold(),
        None => "Unranked".dimmed(),
    }
}

pub fn display_ranked(ranked: &RankedStats, summoner_level: i64) {
    println!("\n{}", "🏆 RANKED PROFILE".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!("  Level:    {}", summoner_level);
    println!("  Solo/Duo: {}", rank_text(ranked.solo.as_ref()));
    println!("  Flex:     {}", rank_text(ranked.flex.as_ref()));
}

pub fn display_match_history(matches: &[MatchRecord]) {
    if matches.is_empty() {
        println!("\n{}", "No ranked games to show".yellow());
        return;
    }

    let wins = matches.iter().filter(|m| m.win).count();
    let losses = matches.len() - wins;
    let win_rate = wins as f64 / matches.len() as f64 * 100.0;

    let title = format!("📊 MATCH HISTORY (Last {} Ranked Games)", matches.len());
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());
    println!(
        "{} {} W / {} L ({:.1}% WR)\n",
        "📈 Overall:".bold(),
        wins.to_string().green(),
        losses.to_string().red(),
        win_rate
    );

    let rows: Vec<MatchRow> = matches
        .iter()
        .enumerate()
        .map(|(idx, m)| MatchRow {
            number: format!("{}", idx + 1),
            champion: m.champion.clone(),
            role: m.role.to_string(),
            result: if m.win {
                "WIN".green().to_string()
            } else {
                "LOSS".red().to_string()
            },
            kda: format!("{}/{}/{} ({})", m.kills, m.deaths, m.assists, m.kda),
            cs: format!("{} ({}/min)", m.cs, m.cs_per_min),
            minutes: m.game_duration.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_champion_stats(stats: &[ChampionAggregate]) {
    if stats.is_empty() {
        return;
    }

    println!("\n{}", "🎮 CHAMPION POOL".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<ChampionRow> = stats
        .iter()
        .map(|c| ChampionRow {
            champion: c.champion.clone(),
            games: c.games_played.to_string(),
            win_rate: format!("{}%", c.win_rate),
            kda: c.kda.clone(),
            averages: format!("{} / {} / {}", c.avg_kills, c.avg_deaths, c.avg_assists),
            cs_per_min: c.cs_per_min.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_role_stats(roles: &[RoleAggregate]) {
    if roles.is_empty() {
        return;
    }

    println!("\n{}", "🧭 ROLE DISTRIBUTION".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<RoleRow> = roles
        .iter()
        .map(|r| RoleRow {
            role: r.role.to_string(),
            games: r.games.to_string(),
            share: format!("{}%", r.percentage),
            win_rate: format!("{}%", r.win_rate),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_profile(report: &ProfileReport) {
    display_ranked(&report.ranked_stats, report.summoner.summoner_level);
    display_match_history(&report.aggregation.matches);
    display_champion_stats(&report.aggregation.champion_stats);
    display_role_stats(&report.aggregation.role_stats);

    if let Some(role) = report.aggregation.main_role {
        println!("\n{} {}\n", "Main role:".bold().yellow(), role);
    }
}

pub fn display_advice(advice: &str) {
    println!("\n{}", "🧠 COACHING ADVICE".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let sections = AdviceSections::parse(advice);
    if sections.is_empty() {
        println!("{}\n", advice);
        return;
    }

    for (title, body) in [
        ("Strengths", &sections.strengths),
        ("Weaknesses", &sections.weaknesses),
        ("Improvements", &sections.improvements),
        ("Champion Recommendations", &sections.champions),
    ] {
        if body.is_empty() {
            continue;
        }
        println!("{}", title.bold().yellow());
        println!("{}\n", body);
    }
}
