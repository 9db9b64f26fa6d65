//! Address geocoding.
//!
//! Failures are reported as `ApiError::Geocode`, with known provider codes
//! in the server message translated into user-facing text.

use crate::client::{AdminClient, decode, encode};
use crate::error::{ApiError, Result};
use crate::transport::{ApiRequest, Transport};
use survey_admin_core::envelope::unwrap_data;
use survey_admin_core::geocode::{
    GeocodeBatchRequest, GeocodeBatchResponse, GeocodeRequest, GeocodeResponse,
};

impl<T: Transport> AdminClient<T> {
    /// Geocode one address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Geocode` if the request fails
    pub async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResponse> {
        let request = ApiRequest::post("/geocode").with_body(encode(request)?);
        self.send_geocode(request).await
    }

    /// Geocode several addresses; results are matched by index.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Geocode` if the request fails
    pub async fn geocode_batch(&self, request: &GeocodeBatchRequest) -> Result<GeocodeBatchResponse> {
        let request = ApiRequest::post("/geocode/batch").with_body(encode(request)?);
        self.send_geocode(request).await
    }

    async fn send_geocode<R: serde::de::DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let body = self
            .pipeline()
            .send(request)
            .await
            .map_err(|error| {
                let error = ApiError::geocode(&error);
                tracing::debug!(%error, "Geocoding failed");
                error
            })?
            .into_json();
        decode(unwrap_data(&body).clone())
    }
}
