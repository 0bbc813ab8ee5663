// Coaching prompt assembly
//
// The prompt carries pre-computed numbers so the model spends its effort on
// interpretation rather than arithmetic.

use super::champion_stats::ChampionAggregate;
use super::match_record::{kda_ratio, MatchRecord, Role};
use super::ranked::{RankedProfile, RankedStats};
use super::role_stats::RoleAggregate;
use std::fmt::Write;

pub const NO_DATA_PROMPT: &str = "No ranked data available for analysis.";

const TOP_CHAMPIONS: usize = 5;
const RECENT_GAMES: usize = 10;

/// Player facts that come from outside the match list.
#[derive(Debug, Clone, Default)]
pub struct PlayerContext {
    pub summoner_level: i64,
    pub ranked: RankedStats,
}

pub struct PromptInput<'a> {
    pub context: &'a PlayerContext,
    pub records: &'a [MatchRecord],
    pub champions: &'a [ChampionAggregate],
    pub roles: &'a [RoleAggregate],
    pub main_role: Option<Role>,
}

fn rank_line(profile: Option<&RankedProfile>) -> String {
    profile
        .map(|p| p.to_string())
        .unwrap_or_else(|| "Unranked".to_string())
}

pub fn build_coaching_prompt(input: &PromptInput<'_>) -> String {
    let records = input.records;
    if records.is_empty() {
        return NO_DATA_PROMPT.to_string();
    }

    let games = records.len();
    let wins = records.iter().filter(|r| r.win).count();
    let (kills, deaths, assists) = records.iter().fold((0, 0, 0), |(k, d, a), r| {
        (k + r.kills, d + r.deaths, a + r.assists)
    });
    let total_cs: u32 = records.iter().map(|r| r.cs).sum();
    let total_minutes = records.iter().map(|r| r.duration_secs).sum::<i64>() as f64 / 60.0;

    // Writing to a String cannot fail.
    let mut out = String::new();
    let _ = writeln!(
        out,
        "As a League of Legends coach, analyze this player's recent {} ranked games:\n",
        games
    );

    let _ = writeln!(out, "Player Profile:");
    let _ = writeln!(out, "- Summoner Level: {}", input.context.summoner_level);
    let _ = writeln!(out, "- Solo/Duo Rank: {}", rank_line(input.context.ranked.solo.as_ref()));
    let _ = writeln!(out, "- Flex Rank: {}", rank_line(input.context.ranked.flex.as_ref()));
    let _ = writeln!(out, "- Games Analyzed: {}", games);
    let _ = writeln!(
        out,
        "- Main Role: {}",
        input.main_role.unwrap_or(Role::Unknown)
    );
    let _ = writeln!(out, "- Win Rate: {:.1}%", wins as f64 / games as f64 * 100.0);
    let _ = writeln!(out, "- Average KDA: {:.2}", kda_ratio(kills, deaths, assists));
    let _ = writeln!(
        out,
        "- Average CS per minute: {:.1}",
        total_cs as f64 / total_minutes
    );

    let _ = writeln!(out, "\nMost Played Champions:");
    for champ in input.champions.iter().take(TOP_CHAMPIONS) {
        let _ = writeln!(
            out,
            "- {} ({} games, {}% WR, {} KDA, {} CS/min)",
            champ.champion, champ.games_played, champ.win_rate, champ.kda, champ.cs_per_min
        );
    }

    let _ = writeln!(out, "\nRole Distribution:");
    for role in input.roles.iter().filter(|r| r.games > 0) {
        let _ = writeln!(
            out,
            "- {}: {} games ({}%), {}% WR",
            role.role, role.games, role.percentage, role.win_rate
        );
    }

    let _ = writeln!(out, "\nRecent Match History:");
    for (index, game) in records.iter().take(RECENT_GAMES).enumerate() {
        let _ = writeln!(out, "Game {}: {} ({})", index + 1, game.champion, game.role);
        let _ = writeln!(
            out,
            "- Result: {}",
            if game.win { "Victory" } else { "Defeat" }
        );
        let _ = writeln!(
            out,
            "- KDA: {}/{}/{} ({})",
            game.kills, game.deaths, game.assists, game.kda
        );
        let _ = writeln!(out, "- CS: {} ({}/min)", game.cs, game.cs_per_min);
        let _ = writeln!(out, "- Duration: {} minutes", game.game_duration);
    }

    let _ = write!(
        out,
        "\nBased on these {} games:\n\n\
         Strengths:\n\
         [List 3-4 key strengths you observe from their statistics and champion pool]\n\n\
         Weaknesses:\n\
         [List 3-4 main areas where the player needs improvement]\n\n\
         Improvements:\n\
         [Provide 4-5 specific, actionable tips for improvement based on their performance]\n\n\
         Champion Recommendations:\n\
         [Based on their playstyle and current champion pool, recommend 2-3 champions they should focus on or try]\n\n\
         Please format your response with these exact section headers and provide bullet points under each section.",
        games
    );

    out
}
