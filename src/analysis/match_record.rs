use crate::api::endpoints::{RANKED_FLEX_QUEUE, RANKED_SOLO_QUEUE};
use crate::api::models::{MatchDto, ParticipantDto};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

/// Games shorter than this are remakes.
pub const MIN_GAME_DURATION_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    #[serde(rename = "ADC")]
    Adc,
    Support,
    Unknown,
}

impl Role {
    /// The five lanes, in display order.
    pub const LANES: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];

    fn from_position(position: &str) -> Option<Role> {
        match position {
            "TOP" => Some(Role::Top),
            "JUNGLE" => Some(Role::Jungle),
            "MIDDLE" => Some(Role::Mid),
            "BOTTOM" => Some(Role::Adc),
            "UTILITY" => Some(Role::Support),
            _ => None,
        }
    }

    /// Team position first, then individual position, else Unknown.
    pub fn resolve(participant: &ParticipantDto) -> Role {
        Role::from_position(&participant.team_position)
            .or_else(|| Role::from_position(&participant.individual_position))
            .unwrap_or(Role::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Adc => "ADC",
            Role::Support => "Support",
            Role::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_ranked_queue(queue_id: i32) -> bool {
    queue_id == RANKED_SOLO_QUEUE || queue_id == RANKED_FLEX_QUEUE
}

/// (kills + assists) / deaths, with zero deaths counted as one.
pub fn kda_ratio(kills: u32, deaths: u32, assists: u32) -> f64 {
    (kills + assists) as f64 / deaths.max(1) as f64
}

/// One player's line from one ranked game.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub match_id: String,
    pub champion: String,
    pub role: Role,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub kda: String,
    pub cs: u32,
    pub cs_per_min: String,
    /// Rounded minutes.
    pub game_duration: i64,
    #[serde(skip)]
    pub duration_secs: i64,
    pub queue_id: i32,
    pub game_mode: String,
    pub timestamp: DateTime<Utc>,
}

impl MatchRecord {
    /// Reshapes a match into the player's record, or `None` if the match is a
    /// remake, not ranked, or doesn't include the player.
    pub fn from_match(match_data: &MatchDto, puuid: &str) -> Option<Self> {
        let info = &match_data.info;
        if info.game_duration < MIN_GAME_DURATION_SECS || !is_ranked_queue(info.queue_id) {
            return None;
        }

        let player = info.participants.iter().find(|p| p.puuid == puuid)?;
        let cs = player.total_minions_killed + player.neutral_minions_killed;
        let minutes = info.game_duration as f64 / 60.0;

        Some(MatchRecord {
            match_id: match_data.metadata.match_id.clone(),
            champion: player.champion_name.clone(),
            role: Role::resolve(player),
            win: player.win,
            kills: player.kills,
            deaths: player.deaths,
            assists: player.assists,
            kda: format!("{:.2}", kda_ratio(player.kills, player.deaths, player.assists)),
            cs,
            cs_per_min: format!("{:.1}", cs as f64 / minutes),
            game_duration: minutes.round() as i64,
            duration_secs: info.game_duration,
            queue_id: info.queue_id,
            game_mode: info.game_mode.clone(),
            timestamp: Utc
                .timestamp_millis_opt(info.game_creation)
                .single()
                .unwrap_or_default(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn team_position_wins_over_individual_position() {
        let mut p = participant(PLAYER, "Thresh");
        p.team_position = "UTILITY".to_string();
        p.individual_position = "BOTTOM".to_string();
        assert_eq!(Role::resolve(&p), Role::Support);
    }

    #[test]
    fn falls_back_to_individual_position() {
        let mut p = participant(PLAYER, "Lee Sin");
        p.individual_position = "JUNGLE".to_string();
        assert_eq!(Role::resolve(&p), Role::Jungle);
    }

    #[test]
    fn unmapped_positions_are_unknown() {
        let mut p = participant(PLAYER, "Teemo");
        p.individual_position = "Invalid".to_string();
        assert_eq!(Role::resolve(&p), Role::Unknown);
    }

    #[test]
    fn zero_deaths_counts_as_one() {
        assert_eq!(kda_ratio(4, 0, 6), 10.0);
    }

    #[test]
    fn record_reshapes_player_line() {
        let record = MatchRecord::from_match(&game(GameSpec::default()), PLAYER).unwrap();

        assert_eq!(record.champion, "Ahri");
        assert_eq!(record.role, Role::Mid);
        assert_eq!(record.kda, "7.50");
        assert_eq!(record.cs_per_min, "6.0");
        assert_eq!(record.game_duration, 30);
        assert_eq!(record.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn remakes_and_unranked_queues_are_rejected() {
        let remake = game(GameSpec { duration: 200, ..GameSpec::default() });
        let aram = game(GameSpec { queue: 450, ..GameSpec::default() });

        assert!(MatchRecord::from_match(&remake, PLAYER).is_none());
        assert!(MatchRecord::from_match(&aram, PLAYER).is_none());
    }

    #[test]
    fn absent_player_is_rejected() {
        assert!(MatchRecord::from_match(&game(GameSpec::default()), "stranger").is_none());
    }
}
