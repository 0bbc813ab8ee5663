pub mod client;
pub mod endpoints;
pub mod models;
pub mod openai;

use crate::error::AppError;
use endpoints::{Platform, RoutingZone};
use models::{AccountDto, LeagueEntryDto, MatchDto, SummonerDto};

/// Game-data lookups the profile orchestrator depends on.
///
/// Implementations must be shareable across the scoped threads used for
/// batched match fetches.
pub trait GameDataProvider: Send + Sync {
    fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError>;

    fn get_summoner(&self, platform: Platform, puuid: &str) -> Result<SummonerDto, AppError>;

    fn get_league_entries(
        &self,
        platform: Platform,
        summoner: &SummonerDto,
    ) -> Result<Vec<LeagueEntryDto>, AppError>;

    fn get_match_ids(
        &self,
        zone: RoutingZone,
        puuid: &str,
        count: usize,
    ) -> Result<Vec<String>, AppError>;

    fn get_match(&self, zone: RoutingZone, match_id: &str) -> Result<MatchDto, AppError>;
}

/// A chat-style text generation backend.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, AppError>;
}
