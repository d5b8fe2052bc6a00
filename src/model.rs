//! Data models for the Fleet Data API.
//!
//! The API serializes fleets and players as positional arrays and names the
//! metadata key differently per endpoint. Everything in this module is the
//! uniform, already-decoded form: named fields, semantic types, no raw
//! wire values. Decoding lives in [`crate::decode`].
//!
//! All types are plain values. They are built once by a decoder and owned by
//! the response envelope that produced them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A player's role within a fleet.
///
/// The wire carries this as an integer code. Codes outside the set decode to
/// no rank at all rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    None,
    FleetAdmiral,
    ViceAdmiral,
    Commander,
    Major,
    Lieutenant,
    Ensign,
    Candidate,
}

impl Rank {
    /// Every rank, ordered by wire code.
    pub const ALL: [Rank; 8] = [
        Rank::None,
        Rank::FleetAdmiral,
        Rank::ViceAdmiral,
        Rank::Commander,
        Rank::Major,
        Rank::Lieutenant,
        Rank::Ensign,
        Rank::Candidate,
    ];

    /// Look up the rank for a wire code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Rank::None),
            0 => Some(Rank::FleetAdmiral),
            1 => Some(Rank::ViceAdmiral),
            2 => Some(Rank::Commander),
            3 => Some(Rank::Major),
            4 => Some(Rank::Lieutenant),
            5 => Some(Rank::Ensign),
            6 => Some(Rank::Candidate),
            _ => None,
        }
    }

    /// The integer the API uses for this rank.
    pub fn code(self) -> i64 {
        match self {
            Rank::None => -1,
            Rank::FleetAdmiral => 0,
            Rank::ViceAdmiral => 1,
            Rank::Commander => 2,
            Rank::Major => 3,
            Rank::Lieutenant => 4,
            Rank::Ensign => 5,
            Rank::Candidate => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::None => "None",
            Rank::FleetAdmiral => "FleetAdmiral",
            Rank::ViceAdmiral => "ViceAdmiral",
            Rank::Commander => "Commander",
            Rank::Major => "Major",
            Rank::Lieutenant => "Lieutenant",
            Rank::Ensign => "Ensign",
            Rank::Candidate => "Candidate",
        }
    }
}

/// Sampling interval for history and collection list endpoints.
///
/// When no interval is sent the server falls back to monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Interval {
    /// Last collection of each month.
    #[default]
    #[serde(rename = "month")]
    Monthly,
    /// Last collection of each day.
    #[serde(rename = "day")]
    Daily,
    /// Every hourly collection.
    #[serde(rename = "hour")]
    Hourly,
}

impl Interval {
    /// The query-string token for this interval.
    pub fn token(self) -> &'static str {
        match self {
            Interval::Monthly => "month",
            Interval::Daily => "day",
            Interval::Hourly => "hour",
        }
    }
}

/// Metadata of one collection run (an hourly observation).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotMetadata {
    /// ID of the collection.
    pub collection_id: i64,

    /// Timestamp exactly as sent by the API (UTC, no zone suffix).
    pub timestamp: String,

    /// `timestamp` parsed as a UTC instant.
    pub collected_at: DateTime<Utc>,

    /// Seconds the collection run took.
    pub duration: f64,

    /// Number of fleets included in the collection.
    pub fleet_count: i64,

    /// Number of players included in the collection.
    pub player_count: i64,

    /// Whether the monthly tournament was running at collection time.
    pub tournament_running: bool,

    /// Schema version the data was collected with.
    pub data_version: Option<i64>,

    /// Schema version the server used when sending the data.
    pub schema_version: Option<i64>,

    /// Daily battle attempt cap in the tournament.
    pub max_tournament_battle_attempts: Option<i64>,
}

/// A fleet (alliance) as recorded in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fleet {
    /// Fleet ID.
    pub id: i64,

    /// Fleet name at collection time.
    pub name: String,

    /// Sum of stars obtained by the members.
    pub score: i64,

    /// Tournament division design ID.
    pub division_design_id: i64,

    /// Sum of the members' trophies.
    pub trophy: i64,

    /// Championship points of the fleet.
    pub championship_score: i64,

    /// Number of members, pending applicants included.
    pub member_count: i64,

    /// Number of approved members.
    pub approved_member_count: i64,
}

impl Fleet {
    /// Members that have not been approved yet.
    pub fn pending_members(&self) -> i64 {
        self.member_count - self.approved_member_count
    }
}

/// A player (user) as recorded in a collection.
///
/// `fleet_id`, `fleet_score`, `rank` and `fleet_joined_at` are `None` when
/// the player was not in a fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Player ID.
    pub id: i64,

    /// Player name at collection time.
    pub name: String,

    /// ID of the player's fleet.
    pub fleet_id: Option<i64>,

    /// Current trophies.
    pub trophy: i64,

    /// Stars contributed to the fleet.
    pub fleet_score: Option<i64>,

    /// Rank within the fleet.
    pub rank: Option<Rank>,

    /// When the player joined their current fleet.
    pub fleet_joined_at: Option<DateTime<Utc>>,

    /// Last login.
    pub last_login_at: Option<DateTime<Utc>>,

    /// Last time the game client reported the player online.
    pub last_heartbeat_at: Option<DateTime<Utc>>,

    /// Crew donated to fleet mates.
    pub crew_donated: i64,

    /// Crew received from fleet mates.
    pub crew_received: i64,

    /// PvP attacks won.
    pub pvp_attack_wins: i64,

    /// PvP attacks lost.
    pub pvp_attack_losses: i64,

    /// PvP attacks drawn.
    pub pvp_attack_draws: i64,

    /// PvP defences won.
    pub pvp_defence_wins: i64,

    /// PvP defences lost.
    pub pvp_defence_losses: i64,

    /// PvP defences drawn.
    pub pvp_defence_draws: i64,

    /// Championship points of the player.
    pub championship_score: i64,

    /// Highest trophy count ever reached.
    pub highest_trophy: i64,

    /// Number of tournament battles done.
    pub tournament_bonus_score: i64,
}

impl Player {
    pub fn has_fleet(&self) -> bool {
        self.fleet_id.is_some()
    }
}

/// One collection: metadata plus the fleets and players it recorded.
///
/// Fleets and players keep the order the API sent them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Metadata of the collection.
    pub metadata: SnapshotMetadata,

    /// All fleets in the collection.
    pub fleets: Vec<Fleet>,

    /// All players in the collection.
    pub players: Vec<Player>,
}

impl Snapshot {
    /// Find a fleet by ID.
    pub fn fleet(&self, id: i64) -> Option<&Fleet> {
        self.fleets.iter().find(|f| f.id == id)
    }

    /// Find a player by ID.
    pub fn player(&self, id: i64) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// A fleet and its members at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetHistoryRecord {
    /// Metadata of the collection the record comes from.
    pub metadata: SnapshotMetadata,

    /// The fleet.
    pub fleet: Fleet,

    /// Its members, empty when the API sent none.
    pub players: Vec<Player>,
}

/// A player and their fleet, if any, at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerHistoryRecord {
    /// Metadata of the collection the record comes from.
    pub metadata: SnapshotMetadata,

    /// The player.
    pub player: Player,

    /// The player's fleet, if they were in one.
    pub fleet: Option<Fleet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_code_lookup_matches_table() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_code(rank.code()), Some(rank));
        }
    }

    #[test]
    fn test_rank_out_of_range() {
        assert_eq!(Rank::from_code(-2), None);
        assert_eq!(Rank::from_code(7), None);
    }

    #[test]
    fn test_rank_serializes_as_name() {
        assert_eq!(
            serde_json::to_value(Rank::ViceAdmiral).unwrap(),
            serde_json::json!("ViceAdmiral")
        );
        assert_eq!(Rank::None.name(), "None");
    }

    #[test]
    fn test_interval_default_is_monthly() {
        assert_eq!(Interval::default(), Interval::Monthly);
        assert_eq!(Interval::Daily.token(), "day");
        assert_eq!(
            serde_json::to_value(Interval::Hourly).unwrap(),
            serde_json::json!("hour")
        );
    }

    #[test]
    fn test_fleet_pending_members() {
        let fleet = Fleet {
            id: 21,
            name: "Wolfpack".to_string(),
            score: 1200,
            division_design_id: 1,
            trophy: 250_000,
            championship_score: 40,
            member_count: 100,
            approved_member_count: 97,
        };

        assert_eq!(fleet.pending_members(), 3);
    }
}
