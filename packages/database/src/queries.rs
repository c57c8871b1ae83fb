//! Database query functions for job listings.
//!
//! The radius containment predicate and the grouped statistics pipeline
//! are raw SQL via `query_raw_params()`. Partial updates build their SET
//! clause dynamically from the supplied fields.

use std::fmt::Write as _;

use job_board_database_models::{JobRow, StatGroupRow};
use job_board_job_models::{ExperienceLevel, JobChanges, JobDraft};
use job_board_spatial::RadiusFilter;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Column list shared by every query that returns full job rows.
const JOB_COLUMNS: &str = "id, slug, title, description, company, address, \
     job_type, min_education, positions, experience, salary, \
     longitude, latitude, posted_at";

/// Searchable text of a listing, used by the statistics topic filter.
const SEARCH_VECTOR: &str = "to_tsvector('english', \
     title || ' ' || description || ' ' || \
     coalesce(company, '') || ' ' || coalesce(address, ''))";

/// Returns all job listings in store-default order.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn list_jobs(db: &dyn Database) -> Result<Vec<JobRow>, DbError> {
    let rows = db
        .query_raw_params(&format!("SELECT {JOB_COLUMNS} FROM jobs"), &[])
        .await?;

    Ok(rows.iter().map(row_to_job).collect())
}

/// Inserts a job listing and returns the persisted row, including the
/// store-assigned id and timestamp.
///
/// The caller is responsible for validating the draft first.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails or the returned
/// row is missing.
pub async fn insert_job(db: &dyn Database, draft: &JobDraft) -> Result<JobRow, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "INSERT INTO jobs (
                    slug, title, description, company, address,
                    job_type, min_education, positions, experience, salary,
                    longitude, latitude
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING {JOB_COLUMNS}"
            ),
            &[
                DatabaseValue::String(draft.slug()),
                DatabaseValue::String(draft.title.clone()),
                DatabaseValue::String(draft.description.clone()),
                opt_string(draft.company.as_deref()),
                opt_string(draft.address.as_deref()),
                draft
                    .job_type
                    .map_or(DatabaseValue::Null, |t| {
                        DatabaseValue::String(t.to_string())
                    }),
                opt_string(draft.min_education.as_deref()),
                DatabaseValue::Int32(draft.positions.unwrap_or(1)),
                DatabaseValue::String(draft.experience.to_string()),
                DatabaseValue::Real64(draft.salary),
                draft
                    .location
                    .map_or(DatabaseValue::Null, |l| DatabaseValue::Real64(l.lng)),
                draft
                    .location
                    .map_or(DatabaseValue::Null, |l| DatabaseValue::Real64(l.lat)),
            ],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Insert did not return the persisted job".to_string(),
    })?;

    Ok(row_to_job(row))
}

/// Looks up a job by the conjunction of id and slug.
///
/// A correct id paired with a mismatched slug yields `None`, identical to
/// a nonexistent id. More than one match for a single id is a data
/// integrity violation, not a silent first-match.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails or the id matches
/// multiple rows.
pub async fn find_job_by_id_and_slug(
    db: &dyn Database,
    id: i64,
    slug: &str,
) -> Result<Option<JobRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND slug = $2"),
            &[
                DatabaseValue::Int64(id),
                DatabaseValue::String(slug.to_string()),
            ],
        )
        .await?;

    if rows.len() > 1 {
        return Err(DbError::Integrity {
            message: format!("job id {id} matches {} rows", rows.len()),
        });
    }

    Ok(rows.first().map(row_to_job))
}

/// Looks up a job by id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn find_job_by_id(db: &dyn Database, id: i64) -> Result<Option<JobRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"),
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    Ok(rows.first().map(row_to_job))
}

/// Returns all jobs whose location lies within the filter circle.
///
/// The SQL predicate compares the central angle between the filter
/// center and each job location against the filter's angular radius —
/// the same containment test as [`RadiusFilter::contains`], executed by
/// the store. Jobs without a location never match.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn find_jobs_in_radius(
    db: &dyn Database,
    filter: &RadiusFilter,
) -> Result<Vec<JobRow>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {JOB_COLUMNS} FROM jobs
                 WHERE longitude IS NOT NULL AND latitude IS NOT NULL
                   AND acos(LEAST(1.0, GREATEST(-1.0,
                           sin(radians($1)) * sin(radians(latitude))
                         + cos(radians($1)) * cos(radians(latitude))
                         * cos(radians(longitude) - radians($2))
                       ))) <= $3"
            ),
            &[
                DatabaseValue::Real64(filter.center.latitude),
                DatabaseValue::Real64(filter.center.longitude),
                DatabaseValue::Real64(filter.angular_radius),
            ],
        )
        .await?;

    Ok(rows.iter().map(row_to_job).collect())
}

/// Applies a partial update to a job and returns the post-update row.
///
/// Only supplied fields appear in the SET clause. The caller is
/// responsible for the existence check and for validating the changes.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails or the updated
/// row is missing.
pub async fn update_job(
    db: &dyn Database,
    id: i64,
    changes: &JobChanges,
) -> Result<JobRow, DbError> {
    let (sql, params) = build_update_sql(id, changes);

    let rows = db.query_raw_params(&sql, &params).await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: format!("Update did not return job {id}"),
    })?;

    Ok(row_to_job(row))
}

/// Deletes a job by id, returning the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn delete_job(db: &dyn Database, id: i64) -> Result<u64, DbError> {
    let deleted = db
        .exec_raw_params(
            "DELETE FROM jobs WHERE id = $1",
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    Ok(deleted)
}

/// Computes grouped statistics for jobs whose searchable text matches a
/// topic.
///
/// Two stages: filter by full-text match on the topic term, then group
/// by the upper-cased experience category computing count and the
/// positions/salary summaries. Zero groups means no job matched; the
/// caller decides how to report that.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn stats_by_topic(
    db: &dyn Database,
    topic: &str,
) -> Result<Vec<StatGroupRow>, DbError> {
    let rows = db
        .query_raw_params(&stats_sql(), &[DatabaseValue::String(topic.to_string())])
        .await?;

    Ok(rows
        .iter()
        .map(|row| StatGroupRow {
            category: row.to_value("category").unwrap_or_default(),
            total_jobs: row.to_value("total_jobs").unwrap_or(0),
            avg_positions: row.to_value("avg_positions").unwrap_or(0.0),
            avg_salary: row.to_value("avg_salary").unwrap_or(0.0),
            min_salary: row.to_value("min_salary").unwrap_or(0.0),
            max_salary: row.to_value("max_salary").unwrap_or(0.0),
        })
        .collect())
}

/// The grouping key of the statistics pipeline. Selecting and grouping
/// by the same expression makes the result a partition: every matching
/// job lands in exactly one group.
const STATS_GROUP_KEY: &str = "UPPER(experience)";

/// Builds the two-stage statistics pipeline: topic filter, then group
/// by experience category with the summary aggregates.
fn stats_sql() -> String {
    format!(
        "SELECT {STATS_GROUP_KEY} as category,
                COUNT(*) as total_jobs,
                AVG(positions)::double precision as avg_positions,
                AVG(salary)::double precision as avg_salary,
                MIN(salary) as min_salary,
                MAX(salary) as max_salary
         FROM jobs
         WHERE {SEARCH_VECTOR} @@ plainto_tsquery('english', $1)
         GROUP BY {STATS_GROUP_KEY}"
    )
}

/// Builds the UPDATE statement for a partial change set.
///
/// Placeholders are numbered in field order with the id last. A
/// supplied location writes both coordinate columns.
fn build_update_sql(id: i64, changes: &JobChanges) -> (String, Vec<DatabaseValue>) {
    let mut sets: Vec<String> = Vec::new();
    let mut params: Vec<DatabaseValue> = Vec::new();

    if let Some(title) = &changes.title {
        params.push(DatabaseValue::String(title.clone()));
        sets.push(format!("title = ${}", params.len()));
    }
    if let Some(slug) = &changes.slug {
        params.push(DatabaseValue::String(slug.clone()));
        sets.push(format!("slug = ${}", params.len()));
    }
    if let Some(description) = &changes.description {
        params.push(DatabaseValue::String(description.clone()));
        sets.push(format!("description = ${}", params.len()));
    }
    if let Some(company) = &changes.company {
        params.push(DatabaseValue::String(company.clone()));
        sets.push(format!("company = ${}", params.len()));
    }
    if let Some(address) = &changes.address {
        params.push(DatabaseValue::String(address.clone()));
        sets.push(format!("address = ${}", params.len()));
    }
    if let Some(job_type) = changes.job_type {
        params.push(DatabaseValue::String(job_type.to_string()));
        sets.push(format!("job_type = ${}", params.len()));
    }
    if let Some(min_education) = &changes.min_education {
        params.push(DatabaseValue::String(min_education.clone()));
        sets.push(format!("min_education = ${}", params.len()));
    }
    if let Some(positions) = changes.positions {
        params.push(DatabaseValue::Int32(positions));
        sets.push(format!("positions = ${}", params.len()));
    }
    if let Some(experience) = changes.experience {
        params.push(DatabaseValue::String(experience.to_string()));
        sets.push(format!("experience = ${}", params.len()));
    }
    if let Some(salary) = changes.salary {
        params.push(DatabaseValue::Real64(salary));
        sets.push(format!("salary = ${}", params.len()));
    }
    if let Some(location) = changes.location {
        params.push(DatabaseValue::Real64(location.lng));
        sets.push(format!("longitude = ${}", params.len()));
        params.push(DatabaseValue::Real64(location.lat));
        sets.push(format!("latitude = ${}", params.len()));
    }

    let mut sql = format!("UPDATE jobs SET {}", sets.join(", "));
    params.push(DatabaseValue::Int64(id));
    write!(sql, " WHERE id = ${} RETURNING {JOB_COLUMNS}", params.len()).unwrap();

    (sql, params)
}

/// Converts an optional string into a [`DatabaseValue`], using `Null`
/// for `None`.
fn opt_string(value: Option<&str>) -> DatabaseValue {
    value.map_or(DatabaseValue::Null, |s| {
        DatabaseValue::String(s.to_string())
    })
}

/// Converts a database row into a [`JobRow`].
fn row_to_job(row: &switchy_database::Row) -> JobRow {
    let posted_at_naive: chrono::NaiveDateTime = row.to_value("posted_at").unwrap_or_default();
    let posted_at =
        chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(posted_at_naive, chrono::Utc);

    JobRow {
        id: row.to_value("id").unwrap_or(0),
        slug: row.to_value("slug").unwrap_or_default(),
        title: row.to_value("title").unwrap_or_default(),
        description: row.to_value("description").unwrap_or_default(),
        company: row.to_value("company").unwrap_or(None),
        address: row.to_value("address").unwrap_or(None),
        job_type: row
            .to_value::<Option<String>>("job_type")
            .unwrap_or(None)
            .and_then(|s| s.parse().ok()),
        min_education: row.to_value("min_education").unwrap_or(None),
        positions: row.to_value("positions").unwrap_or(1),
        experience: row
            .to_value::<String>("experience")
            .unwrap_or_default()
            .parse()
            .unwrap_or(ExperienceLevel::NoExperience),
        salary: row.to_value("salary").unwrap_or(0.0),
        longitude: row.to_value("longitude").unwrap_or(None),
        latitude: row.to_value("latitude").unwrap_or(None),
        posted_at,
    }
}
