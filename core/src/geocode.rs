//! Geocoding request/response types and helpers.

use serde::{Deserialize, Serialize};

/// Single address to geocode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeRequest {
    /// Free-form address
    pub address: String,
    /// City hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl GeocodeRequest {
    /// Geocode an address without a city hint.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            city: None,
        }
    }

    /// Builder: set the city hint.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// Geocoding result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Longitude
    pub lng: f64,
    /// Latitude
    pub lat: f64,
    /// Precision level reported by the provider
    #[serde(default)]
    pub level: Option<String>,
    /// Precision score, 0-100, higher is more precise
    #[serde(default)]
    pub level_score: Option<u32>,
    /// Precision description
    #[serde(default)]
    pub level_description: Option<String>,
    /// Province
    #[serde(default)]
    pub province: Option<String>,
    /// City
    #[serde(default)]
    pub city: Option<String>,
    /// District
    #[serde(default)]
    pub district: Option<String>,
    /// Full formatted address
    #[serde(default)]
    pub formatted_address: Option<String>,
}

/// Batch geocoding request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeBatchRequest {
    /// Addresses to geocode, answered by index
    pub items: Vec<GeocodeRequest>,
}

/// Per-item failure inside a batch response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeItemError {
    /// Provider error code
    pub code: String,
    /// Provider message
    pub message: String,
}

/// Outcome for one batch item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeocodeBatchItemResult {
    /// Index of the item in the request
    pub index: usize,
    /// Whether the item was geocoded
    pub success: bool,
    /// Failure details
    #[serde(default)]
    pub error: Option<GeocodeItemError>,
    /// Result when successful
    #[serde(default)]
    pub result: Option<GeocodeResponse>,
}

/// Batch geocoding response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeBatchResponse {
    /// One entry per requested item
    #[serde(default)]
    pub results: Vec<GeocodeBatchItemResult>,
}

/// Known geocoding failure codes reported inside the server message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeocodeErrorCode {
    /// Upstream provider failed
    UpstreamError,
    /// Provider quota exhausted
    QuotaLimited,
    /// Address could not be located
    AddressNotFound,
    /// Address rejected by validation
    ValidationFailed,
    /// Provider timed out
    NetworkTimeout,
    /// Provider credentials are not configured
    ConfigMissing,
}

impl GeocodeErrorCode {
    const ALL: [Self; 6] = [
        Self::UpstreamError,
        Self::QuotaLimited,
        Self::AddressNotFound,
        Self::ValidationFailed,
        Self::NetworkTimeout,
        Self::ConfigMissing,
    ];

    /// Wire spelling of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::QuotaLimited => "QUOTA_LIMITED",
            Self::AddressNotFound => "ADDRESS_NOT_FOUND",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::NetworkTimeout => "NETWORK_TIMEOUT",
            Self::ConfigMissing => "CONFIG_MISSING",
        }
    }

    /// Find the first known code contained in a server message.
    #[must_use]
    pub fn find_in(message: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| message.contains(code.as_str()))
    }

    /// User-facing explanation.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::UpstreamError => "Geocoding service error, please try again later",
            Self::QuotaLimited => "Too many geocoding requests, please try again later",
            Self::AddressNotFound => "No location found for this address",
            Self::ValidationFailed => "Address format is invalid",
            Self::NetworkTimeout => "Network timeout, please check your connection",
            Self::ConfigMissing => "Geocoding service is misconfigured",
        }
    }
}

/// Coarse precision bucket derived from a level score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyLevel {
    /// Score 0-20
    Rough,
    /// Score 21-50
    Medium,
    /// Score 51-85
    Precise,
    /// Score above 85
    VeryPrecise,
}

impl AccuracyLevel {
    /// Bucket a level score.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            0..=20 => Self::Rough,
            21..=50 => Self::Medium,
            51..=85 => Self::Precise,
            _ => Self::VeryPrecise,
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Rough => "Rough location",
            Self::Medium => "Medium precision",
            Self::Precise => "Precise location",
            Self::VeryPrecise => "Very precise",
        }
    }
}

/// One-line display form of a geocoding result.
///
/// Uses the formatted address when present, otherwise province, city and
/// district; the precision description is appended in parentheses.
#[must_use]
pub fn format_geocode_result(result: &GeocodeResponse) -> String {
    let mut parts: Vec<&str> = Vec::new();

    match result.formatted_address.as_deref() {
        Some(address) if !address.is_empty() => parts.push(address),
        _ => parts.extend(
            [&result.province, &result.city, &result.district]
                .into_iter()
                .filter_map(|part| part.as_deref())
                .filter(|part| !part.is_empty()),
        ),
    }

    let description = result
        .level_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("({d})"));

    let mut line = parts.join(" ");
    if let Some(description) = description {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&description);
    }
    line
}
