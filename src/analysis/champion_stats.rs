use super::match_record::{kda_ratio, MatchRecord};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct ChampionTotals {
    games: u32,
    wins: u32,
    kills: u32,
    deaths: u32,
    assists: u32,
    cs: u32,
    duration_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionAggregate {
    pub champion: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: String,
    pub avg_kills: String,
    pub avg_deaths: String,
    pub avg_assists: String,
    pub kda: String,
    pub cs_per_min: String,
}

impl ChampionAggregate {
    fn from_totals(champion: String, t: &ChampionTotals) -> Self {
        let games = t.games as f64;
        let minutes = t.duration_secs as f64 / 60.0;
        let cs_per_min = if minutes > 0.0 { t.cs as f64 / minutes } else { 0.0 };

        ChampionAggregate {
            champion,
            games_played: t.games,
            wins: t.wins,
            losses: t.games - t.wins,
            win_rate: format!("{:.1}", t.wins as f64 / games * 100.0),
            avg_kills: format!("{:.1}", t.kills as f64 / games),
            avg_deaths: format!("{:.1}", t.deaths as f64 / games),
            avg_assists: format!("{:.1}", t.assists as f64 / games),
            kda: format!("{:.2}", kda_ratio(t.kills, t.deaths, t.assists)),
            cs_per_min: format!("{:.1}", cs_per_min),
        }
    }
}

pub struct ChampionStatsTracker {
    stats: HashMap<String, ChampionTotals>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        ChampionStatsTracker {
            stats: HashMap::new(),
        }
    }

    pub fn add_game(&mut self, record: &MatchRecord) {
        let entry = self.stats.entry(record.champion.clone()).or_default();

        entry.games += 1;
        if record.win {
            entry.wins += 1;
        }
        entry.kills += record.kills;
        entry.deaths += record.deaths;
        entry.assists += record.assists;
        // Summed so long games weigh in proportion to their length.
        entry.cs += record.cs;
        entry.duration_secs += record.duration_secs;
    }

    /// Aggregates, most-played first.
    pub fn get_stats(&self) -> Vec<ChampionAggregate> {
        let mut stats: Vec<ChampionAggregate> = self
            .stats
            .iter()
            .map(|(name, totals)| ChampionAggregate::from_totals(name.clone(), totals))
            .collect();

        stats.sort_by(|a, b| {
            b.games_played
                .cmp(&a.games_played)
                .then_with(|| a.champion.cmp(&b.champion))
        });
        stats
    }
}

impl Default for ChampionStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
