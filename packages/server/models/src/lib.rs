#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the job board server.
//!
//! Every response is wrapped in a `success` envelope. These types are
//! separate from the database row types so the wire contract can evolve
//! independently of the schema.

use chrono::{DateTime, Utc};
use job_board_database_models::{JobRow, StatGroupRow};
use job_board_job_models::{ExperienceLevel, JobLocation, JobType};
use serde::{Deserialize, Serialize};

/// A job listing as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiJob {
    /// Unique job id.
    pub id: i64,
    /// URL-friendly secondary key.
    pub slug: String,
    /// Job title.
    pub title: String,
    /// Full listing description.
    pub description: String,
    /// Hiring company name.
    pub company: Option<String>,
    /// Free-text address of the position.
    pub address: Option<String>,
    /// Employment type.
    pub job_type: Option<JobType>,
    /// Minimum education requirement.
    pub min_education: Option<String>,
    /// Number of open positions.
    pub positions: i32,
    /// Required experience level.
    pub experience: ExperienceLevel,
    /// Annual salary.
    pub salary: f64,
    /// Geographic point of the listing, when known.
    pub location: Option<JobLocation>,
    /// When the listing was created (ISO 8601).
    pub posted_at: DateTime<Utc>,
}

impl From<JobRow> for ApiJob {
    fn from(row: JobRow) -> Self {
        let location = match (row.longitude, row.latitude) {
            (Some(lng), Some(lat)) => Some(JobLocation { lng, lat }),
            _ => None,
        };

        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            company: row.company,
            address: row.address,
            job_type: row.job_type,
            min_education: row.min_education,
            positions: row.positions,
            experience: row.experience,
            salary: row.salary,
            location,
            posted_at: row.posted_at,
        }
    }
}

/// One grouped-statistics entry as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatGroup {
    /// Upper-cased experience category this group summarizes.
    pub category: String,
    /// Number of matching jobs in the category.
    pub total_jobs: i64,
    /// Arithmetic mean of open positions.
    pub avg_positions: f64,
    /// Arithmetic mean salary.
    pub avg_salary: f64,
    /// Minimum salary.
    pub min_salary: f64,
    /// Maximum salary.
    pub max_salary: f64,
}

impl From<StatGroupRow> for ApiStatGroup {
    fn from(row: StatGroupRow) -> Self {
        Self {
            category: row.category,
            total_jobs: row.total_jobs,
            avg_positions: row.avg_positions,
            avg_salary: row.avg_salary,
            min_salary: row.min_salary,
            max_salary: row.max_salary,
        }
    }
}

/// Envelope for collection responses: list-all and radius search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    /// Always `true` on success.
    pub success: bool,
    /// Number of jobs in `data`.
    pub results: usize,
    /// The matching jobs.
    pub data: Vec<ApiJob>,
}

impl JobListResponse {
    /// Wraps a job collection in the success envelope.
    #[must_use]
    pub fn new(jobs: Vec<ApiJob>) -> Self {
        Self {
            success: true,
            results: jobs.len(),
            data: jobs,
        }
    }
}

/// Envelope for the id+slug lookup. The data payload is a collection
/// for wire compatibility even though at most one job matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleJobResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The matching job.
    pub data: Vec<ApiJob>,
}

impl SingleJobResponse {
    /// Wraps the matched job in the success envelope.
    #[must_use]
    pub fn new(job: ApiJob) -> Self {
        Self {
            success: true,
            data: vec![job],
        }
    }
}

/// Envelope for create and update responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMutationResponse {
    /// Always `true` on success.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// The persisted job after the mutation.
    pub data: ApiJob,
}

/// Envelope for the grouped statistics response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Always `true` on success.
    pub success: bool,
    /// One entry per experience category.
    pub data: Vec<ApiStatGroup>,
}

/// Envelope for message-only responses: delete confirmations and every
/// error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// `true` for delete confirmations, `false` for errors.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_row() -> JobRow {
        JobRow {
            id: 12,
            slug: "engineer-1".to_string(),
            title: "Engineer".to_string(),
            description: "Build things".to_string(),
            company: Some("Acme".to_string()),
            address: None,
            job_type: Some(JobType::Permanent),
            min_education: None,
            positions: 2,
            experience: ExperienceLevel::FivePlusYears,
            salary: 120_000.0,
            longitude: Some(-122.4),
            latitude: Some(37.8),
            posted_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn api_job_carries_location_when_both_coordinates_present() {
        let job = ApiJob::from(job_row());
        let location = job.location.unwrap();
        assert!((location.lng - -122.4).abs() < 1e-9);
        assert!((location.lat - 37.8).abs() < 1e-9);
    }

    #[test]
    fn api_job_drops_partial_coordinates() {
        let mut row = job_row();
        row.latitude = None;
        assert!(ApiJob::from(row).location.is_none());
    }

    #[test]
    fn list_envelope_counts_results() {
        let response = JobListResponse::new(vec![ApiJob::from(job_row())]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["results"], 1);
        assert_eq!(value["data"][0]["title"], "Engineer");
        assert_eq!(value["data"][0]["jobType"], "PERMANENT");
        assert_eq!(value["data"][0]["location"]["lng"], -122.4);
    }

    #[test]
    fn single_job_envelope_wraps_a_collection() {
        let response = SingleJobResponse::new(ApiJob::from(job_row()));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert!(value["data"].is_array());
        assert_eq!(value["data"][0]["slug"], "engineer-1");
    }

    #[test]
    fn stat_group_serializes_with_documented_keys() {
        let group = ApiStatGroup::from(StatGroupRow {
            category: "FIVE_PLUS_YEARS".to_string(),
            total_jobs: 3,
            avg_positions: 2.5,
            avg_salary: 110_000.0,
            min_salary: 90_000.0,
            max_salary: 130_000.0,
        });
        let value = serde_json::to_value(&group).unwrap();

        assert_eq!(value["category"], "FIVE_PLUS_YEARS");
        assert_eq!(value["totalJobs"], 3);
        assert_eq!(value["avgPositions"], 2.5);
        assert_eq!(value["avgSalary"], 110_000.0);
        assert_eq!(value["minSalary"], 90_000.0);
        assert_eq!(value["maxSalary"], 130_000.0);
    }
}
