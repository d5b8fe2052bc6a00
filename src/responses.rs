//! Response envelopes: an HTTP status code paired with the decoded payload.
//!
//! There is one envelope per endpoint shape. The body is decoded only for
//! 2xx responses; anything else keeps the raw body in `error_body` and
//! leaves the payload empty so the caller can decide what the status means.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::decode::{decode_array, parse_body};
use crate::error::DecodeResult;
use crate::model::{
    Fleet, FleetHistoryRecord, Player, PlayerHistoryRecord, Snapshot, SnapshotMetadata,
};
use crate::transport::RawResponse;

/// Construction of an envelope from a raw HTTP exchange.
pub trait Envelope: Sized {
    fn from_raw(raw: RawResponse) -> DecodeResult<Self>;

    fn status_code(&self) -> u16;

    /// Whether the API answered with a 2xx status.
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code())
    }
}

/// Decode the body of a successful response; `None` for any other status.
fn decode_success<T>(
    raw: &RawResponse,
    decode: impl FnOnce(&Value) -> DecodeResult<T>,
) -> DecodeResult<Option<T>> {
    if !raw.is_success() {
        warn!(status_code = raw.status_code, "API returned a non-success status");
        return Ok(None);
    }
    let json = parse_body(&raw.body)?;
    decode(&json).map(Some)
}

fn error_body(raw: RawResponse) -> Option<String> {
    (!raw.is_success()).then_some(raw.body)
}

/// Response of `/collections/{collectionId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotResponse {
    pub status_code: u16,
    pub snapshot: Option<Snapshot>,
    pub error_body: Option<String>,
}

impl Envelope for SnapshotResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let snapshot = decode_success(&raw, Snapshot::decode)?;
        Ok(Self {
            status_code: raw.status_code,
            snapshot,
            error_body: error_body(raw),
        })
    }
}

/// Response of `/collections`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadatasResponse {
    pub status_code: u16,
    pub metadatas: Vec<SnapshotMetadata>,
    pub error_body: Option<String>,
}

impl Envelope for MetadatasResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let metadatas = decode_success(&raw, |json| {
            decode_array(json, SnapshotMetadata::decode)
        })?;
        Ok(Self {
            status_code: raw.status_code,
            metadatas: metadatas.unwrap_or_default(),
            error_body: error_body(raw),
        })
    }
}

/// Response of `/collections/{collectionId}/alliances`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetsResponse {
    pub status_code: u16,
    pub metadata: Option<SnapshotMetadata>,
    pub fleets: Vec<Fleet>,
    pub error_body: Option<String>,
}

impl Envelope for FleetsResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let (metadata, fleets) = match decode_success(&raw, Snapshot::decode)? {
            Some(snapshot) => (Some(snapshot.metadata), snapshot.fleets),
            None => (None, Vec::new()),
        };
        Ok(Self {
            status_code: raw.status_code,
            metadata,
            fleets,
            error_body: error_body(raw),
        })
    }
}

/// Response of `/collections/{collectionId}/users` and `.../top100Users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayersResponse {
    pub status_code: u16,
    pub metadata: Option<SnapshotMetadata>,
    pub players: Vec<Player>,
    pub error_body: Option<String>,
}

impl Envelope for PlayersResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let (metadata, players) = match decode_success(&raw, Snapshot::decode)? {
            Some(snapshot) => (Some(snapshot.metadata), snapshot.players),
            None => (None, Vec::new()),
        };
        Ok(Self {
            status_code: raw.status_code,
            metadata,
            players,
            error_body: error_body(raw),
        })
    }
}

/// Response of `/collections/{collectionId}/alliances/{allianceId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetHistoryResponse {
    pub status_code: u16,
    pub fleet_history: Option<FleetHistoryRecord>,
    pub error_body: Option<String>,
}

impl Envelope for FleetHistoryResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let fleet_history = decode_success(&raw, FleetHistoryRecord::decode)?;
        Ok(Self {
            status_code: raw.status_code,
            fleet_history,
            error_body: error_body(raw),
        })
    }
}

/// Response of `/allianceHistory/{allianceId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetHistoriesResponse {
    pub status_code: u16,
    pub fleet_histories: Vec<FleetHistoryRecord>,
    pub error_body: Option<String>,
}

impl Envelope for FleetHistoriesResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let fleet_histories = decode_success(&raw, |json| {
            decode_array(json, FleetHistoryRecord::decode)
        })?;
        Ok(Self {
            status_code: raw.status_code,
            fleet_histories: fleet_histories.unwrap_or_default(),
            error_body: error_body(raw),
        })
    }
}

/// Response of `/collections/{collectionId}/users/{userId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerHistoryResponse {
    pub status_code: u16,
    pub player_history: Option<PlayerHistoryRecord>,
    pub error_body: Option<String>,
}

impl Envelope for PlayerHistoryResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let player_history = decode_success(&raw, PlayerHistoryRecord::decode)?;
        Ok(Self {
            status_code: raw.status_code,
            player_history,
            error_body: error_body(raw),
        })
    }
}

/// Response of `/userHistory/{userId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerHistoriesResponse {
    pub status_code: u16,
    pub player_histories: Vec<PlayerHistoryRecord>,
    pub error_body: Option<String>,
}

impl Envelope for PlayerHistoriesResponse {
    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn from_raw(raw: RawResponse) -> DecodeResult<Self> {
        let player_histories = decode_success(&raw, |json| {
            decode_array(json, PlayerHistoryRecord::decode)
        })?;
        Ok(Self {
            status_code: raw.status_code,
            player_histories: player_histories.unwrap_or_default(),
            error_body: error_body(raw),
        })
    }
}
