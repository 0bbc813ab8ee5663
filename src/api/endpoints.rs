// Riot API hosts and URL builders

use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

/// Accounts are resolved on one shared routing zone regardless of region.
pub const ACCOUNT_ROUTING: RoutingZone = RoutingZone::Americas;

pub const RANKED_SOLO_QUEUE: i32 = 420;
pub const RANKED_FLEX_QUEUE: i32 = 440;

/// Regional routing values used by the account and match APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingZone {
    Americas,
    Europe,
    Asia,
    Sea,
}

impl RoutingZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingZone::Americas => "americas",
            RoutingZone::Europe => "europe",
            RoutingZone::Asia => "asia",
            RoutingZone::Sea => "sea",
        }
    }
}

impl fmt::Display for RoutingZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform (server) codes accepted by the summoner and league APIs.
///
/// Region strings from callers are only ever turned into hosts through this
/// table, so an unknown code can never reach a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Na1,
    Br1,
    La1,
    La2,
    Euw1,
    Eun1,
    Tr1,
    Ru,
    Me1,
    Kr,
    Jp1,
    Oc1,
    Ph2,
    Sg2,
    Th2,
    Tw2,
    Vn2,
}

impl Platform {
    pub const ALL: [Platform; 17] = [
        Platform::Na1,
        Platform::Br1,
        Platform::La1,
        Platform::La2,
        Platform::Euw1,
        Platform::Eun1,
        Platform::Tr1,
        Platform::Ru,
        Platform::Me1,
        Platform::Kr,
        Platform::Jp1,
        Platform::Oc1,
        Platform::Ph2,
        Platform::Sg2,
        Platform::Th2,
        Platform::Tw2,
        Platform::Vn2,
    ];

    /// Case-insensitive lookup of a platform code such as `EUW1`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str().eq_ignore_ascii_case(code))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Na1 => "na1",
            Platform::Br1 => "br1",
            Platform::La1 => "la1",
            Platform::La2 => "la2",
            Platform::Euw1 => "euw1",
            Platform::Eun1 => "eun1",
            Platform::Tr1 => "tr1",
            Platform::Ru => "ru",
            Platform::Me1 => "me1",
            Platform::Kr => "kr",
            Platform::Jp1 => "jp1",
            Platform::Oc1 => "oc1",
            Platform::Ph2 => "ph2",
            Platform::Sg2 => "sg2",
            Platform::Th2 => "th2",
            Platform::Tw2 => "tw2",
            Platform::Vn2 => "vn2",
        }
    }

    pub fn routing_zone(&self) -> RoutingZone {
        match self {
            Platform::Na1 | Platform::Br1 | Platform::La1 | Platform::La2 => RoutingZone::Americas,
            Platform::Euw1 | Platform::Eun1 | Platform::Tr1 | Platform::Ru | Platform::Me1 => {
                RoutingZone::Europe
            }
            Platform::Kr | Platform::Jp1 => RoutingZone::Asia,
            Platform::Oc1
            | Platform::Ph2
            | Platform::Sg2
            | Platform::Th2
            | Platform::Tw2
            | Platform::Vn2 => RoutingZone::Sea,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::from_code(s)
            .ok_or_else(|| AppError::InvalidRequest(format!("Unknown region code: {}", s.trim())))
    }
}

/// Resolves hosts for platform (`na1`) and regional (`americas`) calls.
#[derive(Debug, Clone, Default)]
pub struct RiotHosts {
    base_override: Option<String>,
}

impl RiotHosts {
    pub fn new(base_override: Option<String>) -> Self {
        RiotHosts {
            base_override: base_override.map(|b| b.trim_end_matches('/').to_string()),
        }
    }

    fn host(&self, subdomain: &'static str) -> String {
        match &self.base_override {
            Some(base) => base.clone(),
            None => format!("https://{}.api.riotgames.com", subdomain),
        }
    }

    pub fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> String {
        format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.host(ACCOUNT_ROUTING.as_str()),
            encode_path_segment(game_name),
            encode_path_segment(tag_line)
        )
    }

    pub fn summoner_by_puuid(&self, platform: Platform, puuid: &str) -> String {
        format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.host(platform.as_str()),
            puuid
        )
    }

    pub fn league_entries_by_summoner(&self, platform: Platform, summoner_id: &str) -> String {
        format!(
            "{}/lol/league/v4/entries/by-summoner/{}",
            self.host(platform.as_str()),
            summoner_id
        )
    }

    pub fn league_entries_by_puuid(&self, platform: Platform, puuid: &str) -> String {
        format!(
            "{}/lol/league/v4/entries/by-puuid/{}",
            self.host(platform.as_str()),
            puuid
        )
    }

    pub fn ranked_match_ids(&self, zone: RoutingZone, puuid: &str, count: usize) -> String {
        format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?type=ranked&start=0&count={}",
            self.host(zone.as_str()),
            puuid,
            count
        )
    }

    pub fn match_detail(&self, zone: RoutingZone, match_id: &str) -> String {
        format!(
            "{}/lol/match/v5/matches/{}",
            self.host(zone.as_str()),
            match_id
        )
    }
}

/// Percent-encodes a Riot id component (names may contain spaces and non-ASCII).
fn encode_path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_table_maps_known_codes() {
        assert_eq!(Platform::from_code("na1"), Some(Platform::Na1));
        assert_eq!(Platform::from_code(" EUW1 "), Some(Platform::Euw1));
        assert_eq!(Platform::Na1.routing_zone(), RoutingZone::Americas);
        assert_eq!(Platform::Euw1.routing_zone(), RoutingZone::Europe);
        assert_eq!(Platform::Kr.routing_zone(), RoutingZone::Asia);
        assert_eq!(Platform::Oc1.routing_zone(), RoutingZone::Sea);
    }

    #[test]
    fn every_platform_code_round_trips() {
        for platform in Platform::ALL {
            assert_eq!(Platform::from_code(platform.as_str()), Some(platform));
        }
    }

    #[test]
    fn unknown_region_is_rejected() {
        assert_eq!(Platform::from_code("atlantis"), None);
        assert_eq!(Platform::from_code(""), None);
        let err = "atlantis".parse::<Platform>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown region code: atlantis");
    }

    #[test]
    fn host_like_region_never_reaches_url() {
        for hostile in ["evil.example/x#", "127.0.0.1:8080/x#", "na1.evil.example", "na1/"] {
            assert_eq!(Platform::from_code(hostile), None, "{hostile:?}");
        }

        let hosts = RiotHosts::default();
        for platform in Platform::ALL {
            let url = hosts.summoner_by_puuid(platform, "p");
            let expected = format!("https://{}.api.riotgames.com/", platform);
            assert!(url.starts_with(&expected), "{url}");
        }
    }

    #[test]
    fn account_url_uses_shared_zone_and_encodes_name() {
        let hosts = RiotHosts::default();
        assert_eq!(
            hosts.account_by_riot_id("Faker Jr", "KR1"),
            "https://americas.api.riotgames.com/riot/account/v1/accounts/by-riot-id/Faker%20Jr/KR1"
        );
    }

    #[test]
    fn base_override_replaces_every_host() {
        let hosts = RiotHosts::new(Some("http://127.0.0.1:1234/".to_string()));
        assert_eq!(
            hosts.summoner_by_puuid(Platform::Euw1, "abc"),
            "http://127.0.0.1:1234/lol/summoner/v4/summoners/by-puuid/abc"
        );
        assert_eq!(
            hosts.match_detail(RoutingZone::Europe, "EUW1_1"),
            "http://127.0.0.1:1234/lol/match/v5/matches/EUW1_1"
        );
    }
}
