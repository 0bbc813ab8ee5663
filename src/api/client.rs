use crate::config::Config;
use crate::error::AppError;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints::{Platform, RiotHosts, RoutingZone};
use super::models::*;
use super::GameDataProvider;

const USER_AGENT: &str = "rift_coach/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
// Development keys allow 20 requests per second.
const REQUESTS_PER_SECOND: u32 = 20;

pub struct RiotApiClient {
    agent: ureq::Agent,
    api_key: String,
    hosts: RiotHosts,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    clock: DefaultClock,
}

impl RiotApiClient {
    pub fn new(config: &Config) -> Self {
        let quota =
            Quota::per_second(NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN));
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();

        RiotApiClient {
            agent,
            api_key: config.riot_api_key.clone(),
            hosts: RiotHosts::new(config.riot_base_url.clone()),
            rate_limiter: RateLimiter::direct(quota),
            clock: DefaultClock::default(),
        }
    }

    /// Blocks until the shared quota admits one more request.
    fn throttle(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            let wait = not_until.wait_time_from(self.clock.now());
            thread::sleep(wait);
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
    ) -> Result<T, AppError> {
        self.throttle();

        let response = self
            .agent
            .get(url)
            .set("X-Riot-Token", &self.api_key)
            .call();

        match response {
            Ok(resp) => {
                let body = resp
                    .into_string()
                    .map_err(|e| AppError::HttpError(e.to_string()))?;
                serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
            }
            Err(ureq::Error::Status(429, _)) => Err(AppError::RateLimited),
            Err(ureq::Error::Status(status, resp)) => Err(AppError::Upstream {
                service,
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(AppError::HttpError(e.to_string())),
        }
    }
}

impl GameDataProvider for RiotApiClient {
    fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = self.hosts.account_by_riot_id(game_name, tag_line);
        self.get_json("Account", &url)
    }

    fn get_summoner(&self, platform: Platform, puuid: &str) -> Result<SummonerDto, AppError> {
        let url = self.hosts.summoner_by_puuid(platform, puuid);
        self.get_json("Summoner", &url)
    }

    fn get_league_entries(
        &self,
        platform: Platform,
        summoner: &SummonerDto,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        let url = if summoner.id.is_empty() {
            self.hosts.league_entries_by_puuid(platform, &summoner.puuid)
        } else {
            self.hosts.league_entries_by_summoner(platform, &summoner.id)
        };
        self.get_json("League", &url)
    }

    fn get_match_ids(
        &self,
        zone: RoutingZone,
        puuid: &str,
        count: usize,
    ) -> Result<Vec<String>, AppError> {
        let url = self.hosts.ranked_match_ids(zone, puuid, count);
        self.get_json("Match list", &url)
    }

    fn get_match(&self, zone: RoutingZone, match_id: &str) -> Result<MatchDto, AppError> {
        let url = self.hosts.match_detail(zone, match_id);
        self.get_json("Match", &url)
    }
}
