use super::match_record::{MatchRecord, Role};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAggregate {
    pub role: Role,
    pub games: u32,
    pub wins: u32,
    pub win_rate: String,
    /// Share of all filtered games, one decimal.
    pub percentage: String,
}

/// Per-role breakdown. Every lane is listed once there is at least one game;
/// Unknown only appears when some game had no resolvable position.
/// Sorted by games descending, lanes keep their display order on ties.
pub fn role_breakdown(records: &[MatchRecord]) -> Vec<RoleAggregate> {
    let total = records.len();
    if total == 0 {
        return Vec::new();
    }

    let mut roles: Vec<Role> = Role::LANES.to_vec();
    if records.iter().any(|r| r.role == Role::Unknown) {
        roles.push(Role::Unknown);
    }

    let mut breakdown: Vec<RoleAggregate> = roles
        .into_iter()
        .map(|role| {
            let (games, wins) = records
                .iter()
                .filter(|r| r.role == role)
                .fold((0u32, 0u32), |(games, wins), r| (games + 1, wins + r.win as u32));
            let win_rate = if games > 0 {
                wins as f64 / games as f64 * 100.0
            } else {
                0.0
            };

            RoleAggregate {
                role,
                games,
                wins,
                win_rate: format!("{:.1}", win_rate),
                percentage: format!("{:.1}", games as f64 / total as f64 * 100.0),
            }
        })
        .collect();

    // stable sort keeps lane order for ties
    breakdown.sort_by(|a, b| b.games.cmp(&a.games));
    breakdown
}

/// The most played role, if any games were played.
pub fn main_role(breakdown: &[RoleAggregate]) -> Option<Role> {
    breakdown.first().filter(|r| r.games > 0).map(|r| r.role)
}
