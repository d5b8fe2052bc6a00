//! Decoders from Fleet Data API JSON into [`crate::model`] types.
//!
//! Fleets and players arrive as positional arrays. Each is read through a
//! `TupleReader` that checks the minimum arity up front, so a short array
//! fails as a whole instead of yielding a half-filled entity. Trailing
//! elements beyond the schema are ignored.
//!
//! Envelopes name the same things differently per endpoint (`meta` on
//! `/collections/...`, `collection` on the history endpoints). Key
//! resolution is done in one place, `WireEnvelope`, and every composite
//! decoder goes through it.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::codec::{decode_rank, decode_timestamp, parse_collection_timestamp};
use crate::error::{DecodeError, DecodeResult};
use crate::model::{
    Fleet, FleetHistoryRecord, Player, PlayerHistoryRecord, Snapshot, SnapshotMetadata,
};

/// Number of positions in a fleet array.
pub const FLEET_ARITY: usize = 8;

/// Number of positions in a player array.
pub const PLAYER_ARITY: usize = 20;

/// Parse a response body as JSON.
pub fn parse_body(body: &str) -> DecodeResult<Value> {
    Ok(serde_json::from_str(body)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `null`, `false`, `0` and `""` are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ============================================================================
// Positional arrays
// ============================================================================

/// Read access to a positional array of known minimum length.
struct TupleReader<'a> {
    entity: &'static str,
    items: &'a [Value],
}

impl<'a> TupleReader<'a> {
    fn new(entity: &'static str, raw: &'a Value, arity: usize) -> DecodeResult<Self> {
        let items = raw.as_array().ok_or_else(|| {
            DecodeError::entity(entity, format!("expected an array, got {}", json_kind(raw)))
        })?;
        if items.len() < arity {
            return Err(DecodeError::entity(
                entity,
                format!("expected at least {arity} elements, got {}", items.len()),
            ));
        }
        Ok(Self { entity, items })
    }

    fn raw(&self, index: usize) -> &'a Value {
        &self.items[index]
    }

    fn mismatch(&self, index: usize, field: &str, expected: &str) -> DecodeError {
        DecodeError::entity(
            self.entity,
            format!(
                "{field} (index {index}) should be {expected}, got {}",
                json_kind(self.raw(index))
            ),
        )
    }

    fn int(&self, index: usize, field: &str) -> DecodeResult<i64> {
        self.opt_int(index, field)?
            .ok_or_else(|| self.mismatch(index, field, "an integer"))
    }

    /// An integer that may be `null`.
    fn opt_int(&self, index: usize, field: &str) -> DecodeResult<Option<i64>> {
        match self.raw(index) {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| self.mismatch(index, field, "an integer")),
            _ => Err(self.mismatch(index, field, "an integer")),
        }
    }

    fn string(&self, index: usize, field: &str) -> DecodeResult<String> {
        self.raw(index)
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(index, field, "a string"))
    }
}

impl Fleet {
    /// Decode a fleet from its 8-element wire array.
    pub fn decode(raw: &Value) -> DecodeResult<Self> {
        let t = TupleReader::new("Fleet", raw, FLEET_ARITY)?;
        Ok(Self {
            id: t.int(0, "id")?,
            name: t.string(1, "name")?,
            score: t.int(2, "score")?,
            division_design_id: t.int(3, "division_design_id")?,
            trophy: t.int(4, "trophy")?,
            championship_score: t.int(5, "championship_score")?,
            member_count: t.int(6, "member_count")?,
            approved_member_count: t.int(7, "approved_member_count")?,
        })
    }
}

impl Player {
    /// Decode a player from its 20-element wire array.
    pub fn decode(raw: &Value) -> DecodeResult<Self> {
        let t = TupleReader::new("Player", raw, PLAYER_ARITY)?;

        let rank = decode_rank(t.raw(5));
        if rank.is_none() && !t.raw(5).is_null() {
            debug!(code = %t.raw(5), "Unrecognized fleet rank code");
        }

        Ok(Self {
            id: t.int(0, "id")?,
            name: t.string(1, "name")?,
            fleet_id: t.opt_int(2, "fleet_id")?,
            trophy: t.int(3, "trophy")?,
            fleet_score: t.opt_int(4, "fleet_score")?,
            rank,
            fleet_joined_at: decode_timestamp(t.raw(6)),
            last_login_at: decode_timestamp(t.raw(7)),
            last_heartbeat_at: decode_timestamp(t.raw(8)),
            crew_donated: t.int(9, "crew_donated")?,
            crew_received: t.int(10, "crew_received")?,
            pvp_attack_wins: t.int(11, "pvp_attack_wins")?,
            pvp_attack_losses: t.int(12, "pvp_attack_losses")?,
            pvp_attack_draws: t.int(13, "pvp_attack_draws")?,
            pvp_defence_wins: t.int(14, "pvp_defence_wins")?,
            pvp_defence_losses: t.int(15, "pvp_defence_losses")?,
            pvp_defence_draws: t.int(16, "pvp_defence_draws")?,
            championship_score: t.int(17, "championship_score")?,
            highest_trophy: t.int(18, "highest_trophy")?,
            tournament_bonus_score: t.int(19, "tournament_bonus_score")?,
        })
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Collection metadata as it appears on the wire.
#[derive(Debug, Deserialize)]
struct WireMetadata {
    collection_id: i64,
    timestamp: String,
    duration: f64,
    fleet_count: i64,
    user_count: i64,
    tourney_running: bool,
    #[serde(default)]
    data_version: Option<i64>,
    #[serde(default)]
    schema_version: Option<i64>,
    #[serde(default)]
    max_tournament_battle_attempts: Option<i64>,
}

impl SnapshotMetadata {
    /// Decode metadata from an already selected metadata object.
    pub fn decode(raw: &Value) -> DecodeResult<Self> {
        let wire = WireMetadata::deserialize(raw)
            .map_err(|e| DecodeError::entity("SnapshotMetadata", e.to_string()))?;
        let collected_at = parse_collection_timestamp(&wire.timestamp).ok_or_else(|| {
            DecodeError::entity(
                "SnapshotMetadata",
                format!("unparsable timestamp {:?}", wire.timestamp),
            )
        })?;

        Ok(Self {
            collection_id: wire.collection_id,
            timestamp: wire.timestamp,
            collected_at,
            duration: wire.duration,
            fleet_count: wire.fleet_count,
            player_count: wire.user_count,
            tournament_running: wire.tourney_running,
            data_version: wire.data_version,
            schema_version: wire.schema_version,
            max_tournament_battle_attempts: wire.max_tournament_battle_attempts,
        })
    }
}

// ============================================================================
// Envelopes
// ============================================================================

/// Metadata keys, in resolution order.
const METADATA_KEYS: [&str; 2] = ["meta", "collection"];

/// Top-level response object with key resolution helpers.
///
/// A key holding `null` counts as absent.
struct WireEnvelope<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> WireEnvelope<'a> {
    fn new(raw: &'a Value) -> DecodeResult<Self> {
        raw.as_object()
            .map(|fields| Self { fields })
            .ok_or_else(|| {
                DecodeError::envelope(format!("expected an object, got {}", json_kind(raw)))
            })
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// The value of the first key present, else an error naming all of them.
    fn first_of(&self, keys: &[&str]) -> DecodeResult<&'a Value> {
        keys.iter()
            .find_map(|key| self.get(key))
            .ok_or_else(|| DecodeError::envelope(format!("missing key {}", keys.join(" or "))))
    }

    fn required(&self, key: &str) -> DecodeResult<&'a Value> {
        self.first_of(&[key])
    }

    /// The array under `key`, empty when the key is absent.
    fn list_or_empty(&self, key: &str) -> DecodeResult<&'a [Value]> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(DecodeError::envelope(format!(
                "{key} should be an array, got {}",
                json_kind(other)
            ))),
        }
    }

    fn decode_list<T>(
        &self,
        key: &str,
        decode: impl Fn(&Value) -> DecodeResult<T>,
    ) -> DecodeResult<Vec<T>> {
        self.list_or_empty(key)?.iter().map(decode).collect()
    }
}

impl Snapshot {
    /// Decode a collection from a `{meta|collection, fleets?, users?}` envelope.
    pub fn decode(raw: &Value) -> DecodeResult<Self> {
        let envelope = WireEnvelope::new(raw)?;
        let metadata = SnapshotMetadata::decode(envelope.first_of(&METADATA_KEYS)?)?;
        let fleets = envelope.decode_list("fleets", Fleet::decode)?;
        let players = envelope.decode_list("users", Player::decode)?;

        debug!(
            collection_id = metadata.collection_id,
            fleets = fleets.len(),
            players = players.len(),
            "Decoded collection"
        );

        Ok(Self {
            metadata,
            fleets,
            players,
        })
    }
}

impl FleetHistoryRecord {
    /// Decode a `{collection, fleet, users?}` envelope.
    pub fn decode(raw: &Value) -> DecodeResult<Self> {
        let envelope = WireEnvelope::new(raw)?;
        let metadata = SnapshotMetadata::decode(envelope.required("collection")?)?;
        let fleet = Fleet::decode(envelope.required("fleet")?)?;
        let players = envelope.decode_list("users", Player::decode)?;

        Ok(Self {
            metadata,
            fleet,
            players,
        })
    }
}

impl PlayerHistoryRecord {
    /// Decode a `{collection, user, fleet?}` envelope.
    ///
    /// A falsy `fleet` (absent, `null`, `0`, `""`, `false`) means no fleet.
    pub fn decode(raw: &Value) -> DecodeResult<Self> {
        let envelope = WireEnvelope::new(raw)?;
        let metadata = SnapshotMetadata::decode(envelope.required("collection")?)?;
        let player = Player::decode(envelope.required("user")?)?;
        let fleet = envelope
            .get("fleet")
            .filter(|v| is_truthy(v))
            .map(Fleet::decode)
            .transpose()?;

        Ok(Self {
            metadata,
            player,
            fleet,
        })
    }
}

/// Decode a top-level JSON array with `decode` applied to each element.
pub fn decode_array<T>(
    raw: &Value,
    decode: impl Fn(&Value) -> DecodeResult<T>,
) -> DecodeResult<Vec<T>> {
    let items = raw.as_array().ok_or_else(|| {
        DecodeError::envelope(format!("expected an array, got {}", json_kind(raw)))
    })?;
    items.iter().map(decode).collect()
}
