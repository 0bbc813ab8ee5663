pub mod champion_stats;
pub mod match_record;
pub mod prompt;
pub mod ranked;
pub mod role_stats;

use crate::api::models::MatchDto;
use champion_stats::{ChampionAggregate, ChampionStatsTracker};
use match_record::{MatchRecord, Role};
use prompt::{build_coaching_prompt, PlayerContext, PromptInput};
use role_stats::{main_role, role_breakdown, RoleAggregate};
use serde::Serialize;

/// Everything derived from one batch of matches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub matches: Vec<MatchRecord>,
    pub champion_stats: Vec<ChampionAggregate>,
    pub role_stats: Vec<RoleAggregate>,
    pub main_role: Option<Role>,
    pub coaching_prompt: String,
}

/// Filters `matches` down to the player's ranked, non-remake games and rolls
/// them up. Pure; an empty or fully filtered input yields empty aggregates.
pub fn aggregate(matches: &[MatchDto], puuid: &str, context: &PlayerContext) -> Aggregation {
    let mut records: Vec<MatchRecord> = matches
        .iter()
        .filter_map(|m| MatchRecord::from_match(m, puuid))
        .collect();
    records.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.match_id.cmp(&b.match_id))
    });

    let mut tracker = ChampionStatsTracker::new();
    for record in &records {
        tracker.add_game(record);
    }
    let champion_stats = tracker.get_stats();
    let role_stats = role_breakdown(&records);
    let main_role = main_role(&role_stats);

    let coaching_prompt = build_coaching_prompt(&PromptInput {
        context,
        records: &records,
        champions: &champion_stats,
        roles: &role_stats,
        main_role,
    });

    Aggregation {
        matches: records,
        champion_stats,
        role_stats,
        main_role,
        coaching_prompt,
    }
}
