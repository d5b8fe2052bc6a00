//! PSS Fleet Data - a typed client for the Pixel Starships Fleet Data API.
//!
//! # Overview
//!
//! The API serializes fleets and players as positional arrays and wraps
//! them in envelopes whose key names vary by endpoint. This crate turns
//! those payloads into one uniform model, decodes the encoded scalar fields
//! (relative timestamps, fleet rank codes) and encodes request parameters
//! (dates, intervals, paging) into the format the API expects.
//!
//! Everything is synchronous: one call is one GET, decoded once.
//!
//! # Modules
//!
//! - [`model`]: Fleets, players, collection metadata and the records built from them
//! - [`codec`]: Scalar field codecs (timestamps, ranks, date and interval parameters)
//! - [`decode`]: Positional array and envelope decoders
//! - [`params`]: Query parameters, path placeholders and URL assembly
//! - [`routes`]: The API's routing table
//! - [`responses`]: Status code plus decoded payload, per endpoint shape
//! - [`transport`]: The HTTP seam and its reqwest implementation
//! - [`client`]: One method per endpoint

pub mod client;
pub mod codec;
pub mod decode;
pub mod error;
pub mod model;
pub mod params;
pub mod responses;
pub mod routes;
pub mod transport;

pub use client::FleetDataClient;
pub use error::{ClientError, DecodeError};
pub use params::ListOptions;
