//! Nominatim / OpenStreetMap postal code lookup.
//!
//! Uses the structured search endpoint with the `postalcode` parameter.
//! The public instance enforces strict rate limits (1 request per
//! second); the in-process cache in [`crate::cache`] keeps traffic well
//! under that for typical search workloads.
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use crate::{GeocodeError, ZipCandidate};

/// Looks up a postal code, returning the service's ordered candidate
/// list.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing
/// fails.
pub async fn geocode_zip(
    client: &reqwest::Client,
    base_url: &str,
    zipcode: &str,
) -> Result<Vec<ZipCandidate>, GeocodeError> {
    let resp = client
        .get(base_url)
        .query(&[
            ("postalcode", zipcode),
            ("countrycodes", "us"),
            ("format", "jsonv2"),
            ("limit", "5"),
        ])
        .send()
        .await?;

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses a Nominatim JSON response into the ordered candidate list.
fn parse_response(body: &serde_json::Value) -> Result<Vec<ZipCandidate>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let mut candidates = Vec::with_capacity(results.len());

    for entry in results {
        let lat = entry["lat"]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| GeocodeError::Parse {
                message: "Missing lat in Nominatim response".to_string(),
            })?;

        let lon = entry["lon"]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| GeocodeError::Parse {
                message: "Missing lon in Nominatim response".to_string(),
            })?;

        candidates.push(ZipCandidate {
            latitude: lat,
            longitude: lon,
            display_name: entry["display_name"].as_str().map(String::from),
        });
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_candidates_in_order() {
        let body = serde_json::json!([
            {
                "lat": "42.3601",
                "lon": "-71.0589",
                "display_name": "Boston, Suffolk County, Massachusetts, USA"
            },
            {
                "lat": "42.3736",
                "lon": "-71.1097",
                "display_name": "Cambridge, Middlesex County, Massachusetts, USA"
            }
        ]);
        let candidates = parse_response(&body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert!((candidates[0].latitude - 42.3601).abs() < 1e-4);
        assert!((candidates[0].longitude - -71.0589).abs() < 1e-4);
        assert_eq!(
            candidates[0].display_name.as_deref(),
            Some("Boston, Suffolk County, Massachusetts, USA")
        );
    }

    #[test]
    fn parses_empty_response() {
        let body = serde_json::json!([]);
        assert!(parse_response(&body).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array_response() {
        let body = serde_json::json!({"error": "rate limited"});
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::Parse { .. })
        ));
    }

    #[test]
    fn rejects_candidate_without_coordinates() {
        let body = serde_json::json!([{"display_name": "nowhere"}]);
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::Parse { .. })
        ));
    }
}
