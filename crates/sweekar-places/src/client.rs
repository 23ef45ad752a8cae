//! HTTP client for the places web service.
//!
//! Wraps `reqwest` with API key management, endpoint URL construction, and
//! typed response deserialization. Every endpoint checks the `status` field
//! of the JSON envelope and surfaces failures as [`PlacesError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use sweekar_core::Coordinate;

use crate::error::PlacesError;
use crate::types::{
    NearbyResult, NearbySearchResponse, PlaceDetailsResponse, PlaceDetailsResult, DETAIL_FIELDS,
    STATUS_OK, STATUS_ZERO_RESULTS,
};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";

const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";
const DETAILS_PATH: &str = "maps/api/place/details/json";
const PHOTO_PATH: &str = "maps/api/place/photo";

/// Photo bounds used when resolving a place's display image.
pub const PHOTO_MAX_WIDTH: u32 = 400;
pub const PHOTO_MAX_HEIGHT: u32 = 300;

/// Client for the places web service.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for wiremock or a proxy).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so that endpoint paths are joined onto
        // the base rather than replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs a keyword-scoped nearby search around `origin`.
    ///
    /// `ZERO_RESULTS` is a success with an empty list.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns any other non-OK status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_nearby(
        &self,
        origin: Coordinate,
        radius_m: f64,
        keyword: &str,
    ) -> Result<Vec<NearbyResult>, PlacesError> {
        let location = origin.to_string();
        let radius = radius_m.to_string();
        let url = self.build_url(
            NEARBY_SEARCH_PATH,
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("keyword", keyword),
            ],
        )?;

        let response: NearbySearchResponse = self
            .request_json(&url, &format!("nearbysearch(keyword={keyword})"))
            .await?;

        match response.status.as_str() {
            STATUS_OK => Ok(response.results),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            _ => Err(Self::api_error(response.status, response.error_message)),
        }
    }

    /// Fetches the fixed detail field set for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns a non-OK status or an OK
    ///   envelope without a `result`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn get_place_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetailsResult, PlacesError> {
        let fields = DETAIL_FIELDS.join(",");
        let url = self.build_url(
            DETAILS_PATH,
            &[("place_id", place_id), ("fields", fields.as_str())],
        )?;

        let response: PlaceDetailsResponse = self
            .request_json(&url, &format!("details(place_id={place_id})"))
            .await?;

        if response.status != STATUS_OK {
            return Err(Self::api_error(response.status, response.error_message));
        }
        response.result.ok_or_else(|| PlacesError::Api {
            status: STATUS_OK.to_string(),
            message: format!("details for {place_id} had no result"),
        })
    }

    /// Displayable URL for a photo reference, bounded to the given size.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidBaseUrl`] if the endpoint cannot be
    /// joined onto the base URL.
    pub fn photo_url(
        &self,
        photo_reference: &str,
        max_width: u32,
        max_height: u32,
    ) -> Result<String, PlacesError> {
        let width = max_width.to_string();
        let height = max_height.to_string();
        let url = self.build_url(
            PHOTO_PATH,
            &[
                ("maxwidth", width.as_str()),
                ("maxheight", height.as_str()),
                ("photo_reference", photo_reference),
            ],
        )?;
        Ok(url.into())
    }

    /// Builds an endpoint URL with percent-encoded query parameters and the
    /// API key appended last.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and decodes the body.
    ///
    /// The URL carries the API key, so it is stripped from transport errors
    /// and `context` names the call instead.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    fn api_error(status: String, message: Option<String>) -> PlacesError {
        PlacesError::Api {
            status,
            message: message.unwrap_or_else(|| "no error message".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
