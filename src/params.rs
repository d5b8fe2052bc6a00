//! Request side encoding: query parameters, path placeholders and URLs.
//!
//! The client does no range validation. Whatever the caller passes is sent,
//! and the server decides whether it is acceptable.

use std::fmt;

use crate::codec::{DateParam, IntervalParam, encode_date_param, encode_interval_param};

/// Placeholder for a fleet ID in path templates.
pub const FLEET_ID_PLACEHOLDER: &str = "{allianceId}";

/// Placeholder for a collection ID in path templates.
pub const COLLECTION_ID_PLACEHOLDER: &str = "{collectionId}";

/// Placeholder for a player ID in path templates.
pub const USER_ID_PLACEHOLDER: &str = "{userId}";

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Bool(b) => write!(f, "{b}"),
            QueryValue::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Query parameters in the order they are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(&'static str, QueryValue)>,
}

impl QueryParams {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, QueryValue)> {
        self.entries.iter()
    }

    fn push(&mut self, name: &'static str, value: QueryValue) {
        self.entries.push((name, value));
    }

    /// `name=value` pairs joined by `&`, values percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(&value.to_string())))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Build the query parameters for list and history endpoints.
///
/// Each argument is independent and an absent one leaves its key out, as
/// does an empty date or interval string. `skip = 0` is sent but `take = 0`
/// is not. Negative paging values are sent as given.
pub fn build_query_params(
    from_date: Option<&DateParam>,
    to_date: Option<&DateParam>,
    interval: Option<&IntervalParam>,
    desc: Option<bool>,
    skip: Option<i64>,
    take: Option<i64>,
) -> QueryParams {
    let mut params = QueryParams::default();

    if let Some(from) = encode_date_param(from_date).filter(|s| !s.is_empty()) {
        params.push("fromDate", QueryValue::Text(from));
    }
    if let Some(to) = encode_date_param(to_date).filter(|s| !s.is_empty()) {
        params.push("toDate", QueryValue::Text(to));
    }
    if let Some(interval) = encode_interval_param(interval).filter(|s| !s.is_empty()) {
        params.push("interval", QueryValue::Text(interval));
    }
    if let Some(desc) = desc {
        params.push("desc", QueryValue::Bool(desc));
    }
    if let Some(skip) = skip {
        params.push("skip", QueryValue::Int(skip));
    }
    if let Some(take) = take.filter(|&t| t != 0) {
        params.push("take", QueryValue::Int(take));
    }

    params
}

/// Optional filters for list and history endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub from_date: Option<DateParam>,
    pub to_date: Option<DateParam>,
    pub interval: Option<IntervalParam>,
    pub desc: Option<bool>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_date(mut self, value: impl Into<DateParam>) -> Self {
        self.from_date = Some(value.into());
        self
    }

    pub fn to_date(mut self, value: impl Into<DateParam>) -> Self {
        self.to_date = Some(value.into());
        self
    }

    pub fn interval(mut self, value: impl Into<IntervalParam>) -> Self {
        self.interval = Some(value.into());
        self
    }

    pub fn desc(mut self, desc: bool) -> Self {
        self.desc = Some(desc);
        self
    }

    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn take(mut self, take: i64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn query_params(&self) -> QueryParams {
        build_query_params(
            self.from_date.as_ref(),
            self.to_date.as_ref(),
            self.interval.as_ref(),
            self.desc,
            self.skip,
            self.take,
        )
    }
}

/// Values for path placeholders. Unset ones are left in the path as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathArgs {
    pub fleet_id: Option<i64>,
    pub collection_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// Replace the placeholders of `template` that have a value in `args`.
pub fn substitute_path(template: &str, args: &PathArgs) -> String {
    let substitutions = [
        (FLEET_ID_PLACEHOLDER, args.fleet_id),
        (COLLECTION_ID_PLACEHOLDER, args.collection_id),
        (USER_ID_PLACEHOLDER, args.user_id),
    ];

    substitutions
        .iter()
        .fold(template.to_string(), |path, (placeholder, value)| match value {
            Some(id) => path.replacen(placeholder, &id.to_string(), 1),
            None => path,
        })
}

/// Join base URL, path and query string.
pub fn assemble_url(base_url: &str, path: &str, params: &QueryParams) -> String {
    let base = base_url.trim_end_matches('/');
    if params.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}{path}?{}", params.to_query_string())
    }
}
