#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Job listing domain types and payload validation.
//!
//! This crate defines the categorical vocabulary shared across the
//! job-board system (experience levels, job types), the incoming job
//! payload shapes, and the field-level validation applied before any
//! write reaches the database.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Experience required for a job listing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    /// No prior experience required.
    NoExperience,
    /// One to two years.
    OneToTwoYears,
    /// Two to five years.
    TwoToFiveYears,
    /// Five or more years.
    FivePlusYears,
}

/// Employment type of a job listing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    /// Permanent position.
    Permanent,
    /// Fixed-term position.
    Temporary,
    /// Internship.
    Internship,
}

/// A geographic location supplied with a job payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobLocation {
    /// Longitude (WGS84).
    pub lng: f64,
    /// Latitude (WGS84).
    pub lat: f64,
}

/// Incoming payload for creating a job listing.
///
/// All fields are caller-supplied; `slug` is derived from the title when
/// absent. Validation happens via [`JobDraft::validate`] before the draft
/// is handed to the database layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    /// Job title.
    pub title: String,
    /// URL-friendly secondary key. Derived from `title` when omitted.
    pub slug: Option<String>,
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
    pub positions: Option<i32>,
    /// Required experience level.
    pub experience: ExperienceLevel,
    /// Annual salary.
    pub salary: f64,
    /// Geographic point of the listing, when known.
    pub location: Option<JobLocation>,
}

/// Partial update payload for an existing job listing.
///
/// Only supplied fields are validated and written; everything else is
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobChanges {
    /// New title.
    pub title: Option<String>,
    /// New slug.
    pub slug: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New company name.
    pub company: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New employment type.
    pub job_type: Option<JobType>,
    /// New minimum education requirement.
    pub min_education: Option<String>,
    /// New position count.
    pub positions: Option<i32>,
    /// New experience level.
    pub experience: Option<ExperienceLevel>,
    /// New salary.
    pub salary: Option<f64>,
    /// New location.
    pub location: Option<JobLocation>,
}

impl JobChanges {
    /// Returns `true` when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.company.is_none()
            && self.address.is_none()
            && self.job_type.is_none()
            && self.min_education.is_none()
            && self.positions.is_none()
            && self.experience.is_none()
            && self.salary.is_none()
            && self.location.is_none()
    }
}

/// A single rejected field with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// Validation failure listing every offending field in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// All rejected fields.
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid job payload: {joined}")
    }
}

impl std::error::Error for ValidationError {}

/// Maximum accepted title length.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum accepted description length.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

impl JobDraft {
    /// Validates the draft, collecting every offending field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing each rejected field when any
    /// check fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        check_title(&mut errors, &self.title);
        check_description(&mut errors, &self.description);
        check_salary(&mut errors, self.salary);

        if let Some(positions) = self.positions {
            check_positions(&mut errors, positions);
        }
        if let Some(location) = &self.location {
            check_location(&mut errors, location);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }

    /// Returns the slug for this draft, deriving one from the title when
    /// the caller did not supply it.
    #[must_use]
    pub fn slug(&self) -> String {
        self.slug
            .clone()
            .unwrap_or_else(|| slugify(&self.title))
    }
}

impl JobChanges {
    /// Validates the supplied fields, collecting every offending one.
    ///
    /// An empty change set is rejected outright so a `PUT` with no
    /// recognized fields fails loudly instead of rewriting nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing each rejected field when any
    /// check fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError {
                errors: vec![FieldError {
                    field: "body",
                    message: "no updatable fields supplied".to_string(),
                }],
            });
        }

        let mut errors = Vec::new();

        if let Some(title) = &self.title {
            check_title(&mut errors, title);
        }
        if let Some(description) = &self.description {
            check_description(&mut errors, description);
        }
        if let Some(salary) = self.salary {
            check_salary(&mut errors, salary);
        }
        if let Some(positions) = self.positions {
            check_positions(&mut errors, positions);
        }
        if let Some(location) = &self.location {
            check_location(&mut errors, location);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors })
        }
    }
}

fn check_title(errors: &mut Vec<FieldError>, title: &str) {
    if title.trim().is_empty() {
        errors.push(FieldError {
            field: "title",
            message: "must not be empty".to_string(),
        });
    } else if title.len() > MAX_TITLE_LEN {
        errors.push(FieldError {
            field: "title",
            message: format!("must be at most {MAX_TITLE_LEN} characters"),
        });
    }
}

fn check_description(errors: &mut Vec<FieldError>, description: &str) {
    if description.trim().is_empty() {
        errors.push(FieldError {
            field: "description",
            message: "must not be empty".to_string(),
        });
    } else if description.len() > MAX_DESCRIPTION_LEN {
        errors.push(FieldError {
            field: "description",
            message: format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
        });
    }
}

fn check_salary(errors: &mut Vec<FieldError>, salary: f64) {
    if !salary.is_finite() || salary < 0.0 {
        errors.push(FieldError {
            field: "salary",
            message: "must be a non-negative number".to_string(),
        });
    }
}

fn check_positions(errors: &mut Vec<FieldError>, positions: i32) {
    if positions < 0 {
        errors.push(FieldError {
            field: "positions",
            message: "must not be negative".to_string(),
        });
    }
}

fn check_location(errors: &mut Vec<FieldError>, location: &JobLocation) {
    if !location.lng.is_finite() || location.lng < -180.0 || location.lng > 180.0 {
        errors.push(FieldError {
            field: "location.lng",
            message: "must be within [-180, 180]".to_string(),
        });
    }
    if !location.lat.is_finite() || location.lat < -90.0 || location.lat > 90.0 {
        errors.push(FieldError {
            field: "location.lat",
            message: "must be within [-90, 90]".to_string(),
        });
    }
}

/// Derives a URL-friendly slug from a title.
///
/// Lowercases, collapses runs of non-alphanumeric characters into single
/// hyphens, and trims leading/trailing hyphens.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> JobDraft {
        JobDraft {
            title: "Rust Engineer".to_string(),
            slug: None,
            description: "Build backend services".to_string(),
            company: Some("Acme".to_string()),
            address: Some("100 N State St, Boston, MA".to_string()),
            job_type: Some(JobType::Permanent),
            min_education: None,
            positions: Some(2),
            experience: ExperienceLevel::TwoToFiveYears,
            salary: 120_000.0,
            location: Some(JobLocation {
                lng: -122.4,
                lat: 37.8,
            }),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut d = draft();
        d.title = "   ".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "title");
    }

    #[test]
    fn negative_salary_and_positions_both_reported() {
        let mut d = draft();
        d.salary = -1.0;
        d.positions = Some(-3);
        let err = d.validate().unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["salary", "positions"]);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let mut d = draft();
        d.location = Some(JobLocation {
            lng: -200.0,
            lat: 95.0,
        });
        let err = d.validate().unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["location.lng", "location.lat"]);
    }

    #[test]
    fn slug_derives_from_title_when_absent() {
        let mut d = draft();
        d.title = "Senior C++ / Rust Engineer!".to_string();
        assert_eq!(d.slug(), "senior-c-rust-engineer");

        d.slug = Some("engineer-1".to_string());
        assert_eq!(d.slug(), "engineer-1");
    }

    #[test]
    fn empty_change_set_is_rejected() {
        let err = JobChanges::default().validate().unwrap_err();
        assert_eq!(err.errors[0].field, "body");
    }

    #[test]
    fn partial_changes_validate_only_supplied_fields() {
        let changes = JobChanges {
            salary: Some(90_000.0),
            ..JobChanges::default()
        };
        assert!(changes.validate().is_ok());

        let changes = JobChanges {
            title: Some(String::new()),
            ..JobChanges::default()
        };
        assert!(changes.validate().is_err());
    }

    #[test]
    fn experience_level_string_forms() {
        assert_eq!(
            ExperienceLevel::NoExperience.to_string(),
            "NO_EXPERIENCE"
        );
        assert_eq!(
            "FIVE_PLUS_YEARS".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::FivePlusYears
        );
    }
}
