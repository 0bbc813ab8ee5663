use crate::api::models::LeagueEntryDto;
use serde::Serialize;
use std::fmt;

pub const SOLO_QUEUE_TYPE: &str = "RANKED_SOLO_5x5";
pub const FLEX_QUEUE_TYPE: &str = "RANKED_FLEX_SR";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProfile {
    pub queue_type: String,
    pub tier: String,
    pub division: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub win_rate: String,
}

impl From<&LeagueEntryDto> for RankedProfile {
    fn from(entry: &LeagueEntryDto) -> Self {
        let games = entry.wins + entry.losses;
        let win_rate = if games > 0 {
            entry.wins as f64 / games as f64 * 100.0
        } else {
            0.0
        };

        RankedProfile {
            queue_type: entry.queue_type.clone(),
            tier: entry.tier.clone(),
            division: entry.rank.clone(),
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
            win_rate: format!("{:.1}", win_rate),
        }
    }
}

impl fmt::Display for RankedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} LP, {}W / {}L, {}% WR)",
            self.tier, self.division, self.league_points, self.wins, self.losses, self.win_rate
        )
    }
}

/// Solo/duo and flex standings; an empty slot means unranked in that queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStats {
    pub solo: Option<RankedProfile>,
    pub flex: Option<RankedProfile>,
}

impl RankedStats {
    pub fn from_entries(entries: &[LeagueEntryDto]) -> Self {
        let find = |queue: &str| {
            entries
                .iter()
                .find(|e| e.queue_type == queue)
                .map(RankedProfile::from)
        };

        RankedStats {
            solo: find(SOLO_QUEUE_TYPE),
            flex: find(FLEX_QUEUE_TYPE),
        }
    }

    pub fn is_unranked(&self) -> bool {
        self.solo.is_none() && self.flex.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(queue_type: &str, wins: i32, losses: i32) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: queue_type.to_string(),
            tier: "PLATINUM".to_string(),
            rank: "IV".to_string(),
            league_points: 12,
            wins,
            losses,
        }
    }

    #[test]
    fn splits_entries_by_queue() {
        let stats = RankedStats::from_entries(&[
            entry(FLEX_QUEUE_TYPE, 3, 1),
            entry("CHERRY", 9, 9),
            entry(SOLO_QUEUE_TYPE, 40, 35),
        ]);

        let solo = stats.solo.unwrap();
        assert_eq!(solo.win_rate, "53.3");
        assert_eq!(solo.division, "IV");
        assert_eq!(stats.flex.unwrap().win_rate, "75.0");
    }

    #[test]
    fn no_entries_means_unranked() {
        let stats = RankedStats::from_entries(&[]);
        assert!(stats.is_unranked());
    }

    #[test]
    fn display_reads_like_a_rank_line() {
        let profile = RankedProfile::from(&entry(SOLO_QUEUE_TYPE, 1, 1));
        assert_eq!(profile.to_string(), "PLATINUM IV (12 LP, 1W / 1L, 50.0% WR)");
    }
}
