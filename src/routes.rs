//! Routing table of the Fleet Data API.

use crate::params::{COLLECTION_ID_PLACEHOLDER, FLEET_ID_PLACEHOLDER, USER_ID_PLACEHOLDER};

/// One API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// History of one fleet across collections.
    FleetHistory,
    /// Metadata of all collections.
    Collections,
    /// A full collection.
    Collection,
    /// Fleets of a collection.
    CollectionFleets,
    /// One fleet of a collection, with its members.
    CollectionFleet,
    /// The top 100 players of a collection.
    CollectionTopPlayers,
    /// Players of a collection.
    CollectionPlayers,
    /// One player of a collection, with their fleet.
    CollectionPlayer,
    /// History of one player across collections.
    PlayerHistory,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::FleetHistory,
        Route::Collections,
        Route::Collection,
        Route::CollectionFleets,
        Route::CollectionFleet,
        Route::CollectionTopPlayers,
        Route::CollectionPlayers,
        Route::CollectionPlayer,
        Route::PlayerHistory,
    ];

    pub fn path_template(self) -> &'static str {
        match self {
            Route::FleetHistory => "/allianceHistory/{allianceId}",
            Route::Collections => "/collections",
            Route::Collection => "/collections/{collectionId}",
            Route::CollectionFleets => "/collections/{collectionId}/alliances",
            Route::CollectionFleet => "/collections/{collectionId}/alliances/{allianceId}",
            Route::CollectionTopPlayers => "/collections/{collectionId}/top100Users",
            Route::CollectionPlayers => "/collections/{collectionId}/users",
            Route::CollectionPlayer => "/collections/{collectionId}/users/{userId}",
            Route::PlayerHistory => "/userHistory/{userId}",
        }
    }

    /// Placeholders a caller must fill for this route.
    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            Route::Collections => &[],
            Route::FleetHistory => &[FLEET_ID_PLACEHOLDER],
            Route::PlayerHistory => &[USER_ID_PLACEHOLDER],
            Route::Collection
            | Route::CollectionFleets
            | Route::CollectionTopPlayers
            | Route::CollectionPlayers => &[COLLECTION_ID_PLACEHOLDER],
            Route::CollectionFleet => &[COLLECTION_ID_PLACEHOLDER, FLEET_ID_PLACEHOLDER],
            Route::CollectionPlayer => &[COLLECTION_ID_PLACEHOLDER, USER_ID_PLACEHOLDER],
        }
    }

    /// Whether the route takes date range, interval and paging parameters.
    pub fn accepts_list_options(self) -> bool {
        matches!(
            self,
            Route::FleetHistory | Route::Collections | Route::PlayerHistory
        )
    }
}
