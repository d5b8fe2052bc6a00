//! Pixel Starships Fleet Data API client.
//!
//! The Fleet Data API publishes an hourly "collection" of the top fleets,
//! their members and the top players without a fleet, plus per-fleet and
//! per-player history across collections.
//!
//! Each client method performs exactly one GET through the configured
//! [`Transport`] and decodes the answer once. There is no caching and no
//! retrying.
//!
//! # Example
//!
//! ```ignore
//! let client = FleetDataClient::new();
//! let options = ListOptions::new().interval(Interval::Daily).desc(true).take(10);
//! let history = client.get_fleet_history(21, &options)?;
//! for record in &history.fleet_histories {
//!     println!("{} {}", record.metadata.timestamp, record.fleet.trophy);
//! }
//! ```

use tracing::{debug, instrument};

use crate::error::ClientError;
use crate::params::{ListOptions, PathArgs, assemble_url, substitute_path};
use crate::responses::{
    Envelope, FleetHistoriesResponse, FleetHistoryResponse, FleetsResponse, MetadatasResponse,
    PlayerHistoriesResponse, PlayerHistoryResponse, PlayersResponse, SnapshotResponse,
};
use crate::routes::Route;
use crate::transport::{HttpTransport, Transport};

/// Base URL of the public Fleet Data API.
pub const DEFAULT_BASE_URL: &str = "https://fleetdata.dolores2.xyz";

/// Client for the Fleet Data API.
#[derive(Clone)]
pub struct FleetDataClient<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl Default for FleetDataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetDataClient {
    /// Create a client for the public API.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::default(), DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing or mirrors).
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_transport(HttpTransport::default(), base_url)
    }
}

impl<T: Transport> FleetDataClient<T> {
    /// Create a client on top of any transport.
    pub fn with_transport(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    fn request<E: Envelope>(
        &self,
        route: Route,
        args: PathArgs,
        options: Option<&ListOptions>,
    ) -> Result<E, ClientError> {
        let url = self.url_for(route, &args, options);

        debug!(url = %url, "Requesting");

        let raw = self.transport.get(&url)?;
        Ok(E::from_raw(raw)?)
    }

    /// History of a fleet across collections.
    ///
    /// # Arguments
    ///
    /// * `fleet_id` - ID of the fleet
    /// * `options` - Date range, interval (monthly if unset), ordering and paging
    pub fn get_fleet_history(
        &self,
        fleet_id: i64,
        options: &ListOptions,
    ) -> Result<FleetHistoriesResponse, ClientError> {
        let args = PathArgs {
            fleet_id: Some(fleet_id),
            ..PathArgs::default()
        };
        self.request(Route::FleetHistory, args, Some(options))
    }

    /// Metadata of the collections matching `options`.
    pub fn get_collections(&self, options: &ListOptions) -> Result<MetadatasResponse, ClientError> {
        self.request(Route::Collections, PathArgs::default(), Some(options))
    }

    /// A full collection: metadata, fleets and players.
    pub fn get_collection(&self, collection_id: i64) -> Result<SnapshotResponse, ClientError> {
        self.request(Route::Collection, collection_args(collection_id), None)
    }

    /// Fleets recorded in a collection.
    pub fn get_fleets_from_collection(
        &self,
        collection_id: i64,
    ) -> Result<FleetsResponse, ClientError> {
        self.request(Route::CollectionFleets, collection_args(collection_id), None)
    }

    /// One fleet of a collection, with its members.
    pub fn get_fleet_from_collection(
        &self,
        collection_id: i64,
        fleet_id: i64,
    ) -> Result<FleetHistoryResponse, ClientError> {
        let args = PathArgs {
            fleet_id: Some(fleet_id),
            ..collection_args(collection_id)
        };
        self.request(Route::CollectionFleet, args, None)
    }

    /// The top 100 players of a collection.
    pub fn get_top_100_players_from_collection(
        &self,
        collection_id: i64,
    ) -> Result<PlayersResponse, ClientError> {
        self.request(
            Route::CollectionTopPlayers,
            collection_args(collection_id),
            None,
        )
    }

    /// Players recorded in a collection.
    pub fn get_players_from_collection(
        &self,
        collection_id: i64,
    ) -> Result<PlayersResponse, ClientError> {
        self.request(Route::CollectionPlayers, collection_args(collection_id), None)
    }

    /// One player of a collection, with their fleet if they had one.
    pub fn get_player_from_collection(
        &self,
        collection_id: i64,
        user_id: i64,
    ) -> Result<PlayerHistoryResponse, ClientError> {
        let args = PathArgs {
            user_id: Some(user_id),
            ..collection_args(collection_id)
        };
        self.request(Route::CollectionPlayer, args, None)
    }

    /// History of a player across collections.
    pub fn get_player_history(
        &self,
        user_id: i64,
        options: &ListOptions,
    ) -> Result<PlayerHistoriesResponse, ClientError> {
        let args = PathArgs {
            user_id: Some(user_id),
            ..PathArgs::default()
        };
        self.request(Route::PlayerHistory, args, Some(options))
    }

    /// The URL a request would be sent to, without sending it.
    pub fn url_for(&self, route: Route, args: &PathArgs, options: Option<&ListOptions>) -> String {
        let params = options.map(ListOptions::query_params).unwrap_or_default();
        assemble_url(
            &self.base_url,
            &substitute_path(route.path_template(), args),
            &params,
        )
    }
}

fn collection_args(collection_id: i64) -> PathArgs {
    PathArgs {
        collection_id: Some(collection_id),
        ..PathArgs::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::tests::{fleet_json, loner_json, member_json, metadata_json};
    use crate::model::Interval;
    use crate::transport::RawResponse;
    use serde_json::{Value, json};
    use std::cell::RefCell;

    /// Replays one canned response and records requested URLs.
    struct FakeTransport {
        status_code: u16,
        body: String,
        requested: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        fn new(status_code: u16, body: Value) -> Self {
            Self {
                status_code,
                body: body.to_string(),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for &FakeTransport {
        fn get(&self, url: &str) -> Result<RawResponse, ClientError> {
            self.requested.borrow_mut().push(url.to_string());
            Ok(RawResponse {
                status_code: self.status_code,
                body: self.body.clone(),
            })
        }
    }

    #[test]
    fn test_get_collection_url_and_decode() {
        let transport = FakeTransport::new(
            200,
            json!({"meta": metadata_json(), "fleets": [fleet_json()], "users": [loner_json()]}),
        );
        let client = FleetDataClient::with_transport(&transport, "https://api.test");

        let response = client.get_collection(23).unwrap();

        assert_eq!(
            transport.requested.borrow().as_slice(),
            ["https://api.test/collections/23"]
        );
        let snapshot = response.snapshot.unwrap();
        assert_eq!(snapshot.fleets[0].name, "Wolfpack");
        assert_eq!(snapshot.players[0].name, "Drifter");
    }

    #[test]
    fn test_get_fleet_history_sends_list_options() {
        let transport = FakeTransport::new(
            200,
            json!([{"collection": metadata_json(), "fleet": fleet_json(), "users": [member_json()]}]),
        );
        let client = FleetDataClient::with_transport(&transport, "https://api.test");
        let options = ListOptions::new()
            .interval(Interval::Daily)
            .desc(true)
            .skip(0)
            .take(0);

        let response = client.get_fleet_history(21, &options).unwrap();

        assert_eq!(
            transport.requested.borrow().as_slice(),
            ["https://api.test/allianceHistory/21?interval=day&desc=true&skip=0"]
        );
        assert_eq!(response.fleet_histories.len(), 1);
    }

    #[test]
    fn test_collection_routes_fill_both_ids() {
        let transport = FakeTransport::new(
            200,
            json!({"collection": metadata_json(), "user": member_json(), "fleet": fleet_json()}),
        );
        let client = FleetDataClient::with_transport(&transport, "https://api.test");

        let response = client.get_player_from_collection(23, 4711).unwrap();

        assert_eq!(
            transport.requested.borrow().as_slice(),
            ["https://api.test/collections/23/users/4711"]
        );
        assert_eq!(response.player_history.unwrap().player.id, 4711);
    }

    #[test]
    fn test_non_success_is_not_an_error() {
        let transport = FakeTransport::new(404, json!({"detail": "not found"}));
        let client = FleetDataClient::with_transport(&transport, "https://api.test");

        let response = client.get_player_history(1, &ListOptions::new()).unwrap();

        assert_eq!(response.status_code, 404);
        assert!(response.player_histories.is_empty());
        assert!(response.error_body.is_some());
    }

    #[test]
    fn test_decode_error_propagates() {
        let transport = FakeTransport::new(200, json!({"fleets": []}));
        let client = FleetDataClient::with_transport(&transport, "https://api.test");

        let err = client.get_fleets_from_collection(23).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_url_for_leaves_unfilled_placeholders() {
        let client = FleetDataClient::with_base_url("https://api.test");
        let url = client.url_for(Route::CollectionFleet, &collection_args(23), None);
        assert_eq!(url, "https://api.test/collections/23/alliances/{allianceId}");
    }
}
