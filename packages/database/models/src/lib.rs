#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database row types for job listings and grouped statistics.
//!
//! These types represent the shapes of data as stored in and retrieved
//! from the `PostgreSQL` database. They are distinct from the API
//! response types in `job_board_server_models` so the wire contract can
//! evolve independently of the schema.

use chrono::{DateTime, Utc};
use job_board_job_models::{ExperienceLevel, JobType};
use serde::{Deserialize, Serialize};

/// A job listing row as retrieved from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRow {
    /// Primary key, store-assigned.
    pub id: i64,
    /// URL-friendly secondary key. Not guaranteed unique on its own;
    /// lookups pair it with `id`.
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
    /// Minimum education requirement, free text.
    pub min_education: Option<String>,
    /// Number of open positions.
    pub positions: i32,
    /// Required experience level.
    pub experience: ExperienceLevel,
    /// Annual salary.
    pub salary: f64,
    /// Longitude (WGS84), when the listing has a location.
    pub longitude: Option<f64>,
    /// Latitude (WGS84), when the listing has a location.
    pub latitude: Option<f64>,
    /// When the listing was created, store-assigned.
    pub posted_at: DateTime<Utc>,
}

/// One grouped-statistics row: summary figures for a single upper-cased
/// experience category among the jobs matching a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatGroupRow {
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
