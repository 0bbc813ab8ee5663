// Profile lookup pipeline
//
// account -> summoner -> ranked -> match ids -> match details -> aggregate.
// The first two steps are required; everything after degrades to empty data.

use crate::analysis::prompt::PlayerContext;
use crate::analysis::ranked::RankedStats;
use crate::analysis::{aggregate, Aggregation};
use crate::api::endpoints::{Platform, RoutingZone};
use crate::api::models::{AccountDto, MatchDto, SummonerDto};
use crate::api::GameDataProvider;
use crate::error::AppError;
use indicatif::ProgressBar;
use serde::Serialize;
use std::fmt;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const MATCH_COUNT: usize = 20;
pub const MATCH_BATCH_SIZE: usize = 5;
pub const MATCH_BATCH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    ResolvingAccount,
    ResolvingSummoner,
    FetchingRanked,
    FetchingMatchIds,
    FetchingMatchDetails,
    Aggregating,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStage::ResolvingAccount => "resolving account",
            LookupStage::ResolvingSummoner => "resolving summoner",
            LookupStage::FetchingRanked => "fetching ranked entries",
            LookupStage::FetchingMatchIds => "fetching match ids",
            LookupStage::FetchingMatchDetails => "fetching match details",
            LookupStage::Aggregating => "aggregating",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub game_name: String,
    pub tag_line: String,
    pub region: Platform,
}

impl LookupRequest {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Combined result handed back to callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReport {
    pub account: AccountDto,
    pub summoner: SummonerDto,
    pub ranked_stats: RankedStats,
    #[serde(flatten)]
    pub aggregation: Aggregation,
}

/// Batch pacing for match-detail fetches.
#[derive(Debug, Clone, Copy)]
pub struct BatchPolicy {
    pub match_count: usize,
    pub batch_size: usize,
    pub delay: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        BatchPolicy {
            match_count: MATCH_COUNT,
            batch_size: MATCH_BATCH_SIZE,
            delay: MATCH_BATCH_DELAY,
        }
    }
}

pub struct ProfileLookup<'a> {
    provider: &'a dyn GameDataProvider,
    policy: BatchPolicy,
    progress: ProgressBar,
}

impl<'a> ProfileLookup<'a> {
    pub fn new(provider: &'a dyn GameDataProvider) -> Self {
        ProfileLookup {
            provider,
            policy: BatchPolicy::default(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Advances `progress` once per match-detail fetch.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    #[instrument(skip(self), fields(riot_id = %request.riot_id(), region = %request.region))]
    pub fn run(&self, request: &LookupRequest) -> Result<ProfileReport, AppError> {
        let platform = request.region;
        let zone = platform.routing_zone();

        debug!(stage = %LookupStage::ResolvingAccount, "lookup stage");
        let account = self
            .provider
            .get_account(&request.game_name, &request.tag_line)
            .map_err(|e| not_found(request, e))?;

        debug!(stage = %LookupStage::ResolvingSummoner, puuid = %account.puuid, "lookup stage");
        let summoner = self
            .provider
            .get_summoner(platform, &account.puuid)
            .map_err(|e| not_found(request, e))?;

        debug!(stage = %LookupStage::FetchingRanked, "lookup stage");
        let ranked = match self.provider.get_league_entries(platform, &summoner) {
            Ok(entries) => RankedStats::from_entries(&entries),
            Err(e) => {
                warn!(error = %e, "ranked lookup failed, treating player as unranked");
                RankedStats::default()
            }
        };

        debug!(stage = %LookupStage::FetchingMatchIds, %zone, "lookup stage");
        let match_ids = match self
            .provider
            .get_match_ids(zone, &account.puuid, self.policy.match_count)
        {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "match list lookup failed, continuing without matches");
                Vec::new()
            }
        };

        debug!(stage = %LookupStage::FetchingMatchDetails, count = match_ids.len(), "lookup stage");
        let matches = self.fetch_match_details(zone, &match_ids);

        debug!(stage = %LookupStage::Aggregating, fetched = matches.len(), "lookup stage");
        let context = PlayerContext {
            summoner_level: summoner.summoner_level,
            ranked: ranked.clone(),
        };
        let aggregation = aggregate(&matches, &account.puuid, &context);

        info!(
            requested = match_ids.len(),
            fetched = matches.len(),
            analyzed = aggregation.matches.len(),
            "profile lookup complete"
        );

        Ok(ProfileReport {
            account,
            summoner,
            ranked_stats: ranked,
            aggregation,
        })
    }

    /// Fetches batches concurrently, pausing between batches. Failed fetches
    /// are logged and dropped.
    fn fetch_match_details(&self, zone: RoutingZone, match_ids: &[String]) -> Vec<MatchDto> {
        let provider = self.provider;
        self.progress.set_length(match_ids.len() as u64);
        let batch_size = self.policy.batch_size.max(1);
        let mut matches = Vec::with_capacity(match_ids.len());

        for (index, batch) in match_ids.chunks(batch_size).enumerate() {
            if index > 0 {
                thread::sleep(self.policy.delay);
            }

            let results: Vec<(&String, Result<MatchDto, AppError>)> = thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .iter()
                    .map(|id| scope.spawn(move || (id, provider.get_match(zone, id))))
                    .collect();

                handles
                    .into_iter()
                    .zip(batch)
                    .map(|(handle, id)| {
                        handle.join().unwrap_or_else(|_| {
                            (id, Err(AppError::HttpError("match fetch panicked".to_string())))
                        })
                    })
                    .collect()
            });

            for (id, result) in results {
                self.progress.inc(1);
                match result {
                    Ok(match_data) => matches.push(match_data),
                    Err(e) => warn!(match_id = %id, error = %e, "dropping match"),
                }
            }
        }

        self.progress.finish_and_clear();
        matches
    }
}

fn not_found(request: &LookupRequest, err: AppError) -> AppError {
    match err {
        AppError::PlayerNotFound(_) => err,
        other => AppError::PlayerNotFound(format!("{}: {}", request.riot_id(), other)),
    }
}
