#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Postal code geocoding for the radius search endpoint.
//!
//! Resolves a US postal code to a [`GeoPoint`] through a
//! Nominatim-compatible structured search endpoint. The service returns
//! an ordered candidate list; the first candidate wins. Results are kept
//! in a bounded in-process cache keyed by postal code so repeated
//! searches around the same area skip the network round trip.
//!
//! No retries happen here. A transport failure or an empty candidate
//! list is reported to the caller as-is, and the caller decides how to
//! classify it.

pub mod cache;
pub mod nominatim;

use job_board_spatial::GeoPoint;
use thiserror::Error;

/// A single geocoding candidate returned by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ZipCandidate {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Display name of the matched place, when provided.
    pub display_name: Option<String>,
}

/// Errors from postal code resolution.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The service returned zero candidates for the postal code.
    #[error("no location found for postal code '{zipcode}'")]
    NoMatch {
        /// The postal code that failed to resolve.
        zipcode: String,
    },

    /// An empty postal code was supplied.
    #[error("postal code must not be empty")]
    EmptyZipcode,
}

/// Resolves postal codes to coordinates, caching successful lookups.
pub struct ZipResolver {
    client: reqwest::Client,
    base_url: String,
    cache: cache::ZipCache,
}

impl ZipResolver {
    /// Creates a resolver against the given Nominatim-compatible search
    /// endpoint, with the default cache capacity.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            cache: cache::ZipCache::new(cache::DEFAULT_CAPACITY),
        }
    }

    /// Resolves a postal code to the first candidate's coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::EmptyZipcode`] for a blank input,
    /// [`GeocodeError::NoMatch`] when the service finds no candidates,
    /// and [`GeocodeError::Http`] / [`GeocodeError::Parse`] when the
    /// service call itself fails.
    pub async fn resolve(&self, zipcode: &str) -> Result<GeoPoint, GeocodeError> {
        let zipcode = zipcode.trim();
        if zipcode.is_empty() {
            return Err(GeocodeError::EmptyZipcode);
        }

        if let Some(point) = self.cache.get(zipcode) {
            log::debug!("Geocode cache hit for {zipcode}");
            return Ok(point);
        }

        let candidates =
            nominatim::geocode_zip(&self.client, &self.base_url, zipcode).await?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch {
                zipcode: zipcode.to_string(),
            })?;

        let point = GeoPoint::new(first.longitude, first.latitude);
        self.cache.insert(zipcode, point);

        Ok(point)
    }
}
