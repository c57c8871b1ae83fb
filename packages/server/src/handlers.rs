//! HTTP handler functions for the job board API.

use actix_web::{HttpRequest, HttpResponse, web};
use job_board_database::queries;
use job_board_job_models::{JobChanges, JobDraft};
use job_board_server_models::{
    ApiJob, ApiMessage, ApiStatGroup, JobListResponse, JobMutationResponse, SingleJobResponse,
    StatsResponse,
};
use job_board_spatial::RadiusFilter;

use crate::AppState;
use crate::error::ApiError;

/// `GET /api/v1/jobs`
///
/// Returns all jobs, unfiltered, in store-default order.
pub async fn jobs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = queries::list_jobs(state.db.as_ref()).await?;
    let jobs: Vec<ApiJob> = rows.into_iter().map(ApiJob::from).collect();

    Ok(HttpResponse::Ok().json(JobListResponse::new(jobs)))
}

/// `POST /api/v1/jobs/new`
///
/// Validates the payload, then inserts it and returns the persisted
/// record including the store-assigned id.
pub async fn new_job(
    state: web::Data<AppState>,
    payload: web::Json<JobDraft>,
) -> Result<HttpResponse, ApiError> {
    let draft = payload.into_inner();
    draft.validate()?;

    let row = queries::insert_job(state.db.as_ref(), &draft).await?;

    Ok(HttpResponse::Ok().json(JobMutationResponse {
        success: true,
        message: "New job created".to_string(),
        data: ApiJob::from(row),
    }))
}

/// `GET /api/v1/jobs/{id}/{slug}` and `GET /api/v1/jobs/{zipcode}/{distance}`
///
/// The two documented routes share one path shape, so dispatch happens
/// here: a second segment that parses as a number is a search distance,
/// anything else is a slug.
pub async fn job_or_radius(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (first, second) = path.into_inner();

    if let Some(distance) = parse_distance(&second) {
        jobs_in_radius(&state, &first, distance).await
    } else {
        job_by_id_and_slug(&state, &first, &second).await
    }
}

async fn job_by_id_and_slug(
    state: &AppState,
    id: &str,
    slug: &str,
) -> Result<HttpResponse, ApiError> {
    let id: i64 = id.parse().map_err(|_| ApiError::job_not_found())?;

    let row = queries::find_job_by_id_and_slug(state.db.as_ref(), id, slug)
        .await?
        .ok_or_else(ApiError::job_not_found)?;

    Ok(HttpResponse::Ok().json(SingleJobResponse::new(ApiJob::from(row))))
}

async fn jobs_in_radius(
    state: &AppState,
    zipcode: &str,
    distance: f64,
) -> Result<HttpResponse, ApiError> {
    let center = state.geocoder.resolve(zipcode).await?;
    let filter = RadiusFilter::from_miles(center, distance)?;

    let rows = queries::find_jobs_in_radius(state.db.as_ref(), &filter).await?;
    let jobs: Vec<ApiJob> = rows.into_iter().map(ApiJob::from).collect();

    // An empty match set is a valid result here, unlike the stats
    // endpoint where zero groups reports as not-found.
    Ok(HttpResponse::Ok().json(JobListResponse::new(jobs)))
}

/// `GET /api/v1/stats/{topic}`
///
/// Grouped summary statistics for jobs whose searchable text matches the
/// topic. Zero groups means no job matched and reports as not-found.
pub async fn stats(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let topic = path.into_inner();

    let groups = queries::stats_by_topic(state.db.as_ref(), &topic).await?;

    if groups.is_empty() {
        return Err(ApiError::NotFound(format!("No stats found for - {topic}")));
    }

    Ok(HttpResponse::Ok().json(StatsResponse {
        success: true,
        data: groups.into_iter().map(ApiStatGroup::from).collect(),
    }))
}

/// `PUT /api/v1/jobs/{id}`
///
/// Existence check first, then a partial field replacement with the
/// supplied fields re-validated.
pub async fn update_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<JobChanges>,
) -> Result<HttpResponse, ApiError> {
    let id: i64 = path
        .into_inner()
        .parse()
        .map_err(|_| ApiError::job_not_found())?;

    let changes = payload.into_inner();
    changes.validate()?;

    queries::find_job_by_id(state.db.as_ref(), id)
        .await?
        .ok_or_else(ApiError::job_not_found)?;

    let row = queries::update_job(state.db.as_ref(), id, &changes).await?;

    Ok(HttpResponse::Ok().json(JobMutationResponse {
        success: true,
        message: "Job updated".to_string(),
        data: ApiJob::from(row),
    }))
}

/// `DELETE /api/v1/jobs/{id}`
///
/// Existence check first; deleting an already-deleted id reports
/// not-found rather than succeeding silently.
pub async fn delete_job(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id: i64 = path
        .into_inner()
        .parse()
        .map_err(|_| ApiError::job_not_found())?;

    queries::find_job_by_id(state.db.as_ref(), id)
        .await?
        .ok_or_else(ApiError::job_not_found)?;

    queries::delete_job(state.db.as_ref(), id).await?;

    Ok(HttpResponse::Ok().json(ApiMessage {
        success: true,
        message: "Job deleted".to_string(),
    }))
}

/// Fallback for unmatched routes.
pub async fn route_not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::RouteNotFound {
        path: req.path().to_string(),
    })
}

/// Interprets a path segment as a search distance in miles.
///
/// Returns `None` when the segment is not numeric, which routes the
/// request to the id+slug lookup instead.
fn parse_distance(segment: &str) -> Option<f64> {
    segment.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_second_segment_is_a_distance() {
        assert_eq!(parse_distance("20"), Some(20.0));
        assert_eq!(parse_distance("2.5"), Some(2.5));
    }

    #[test]
    fn slug_second_segment_is_not_a_distance() {
        assert_eq!(parse_distance("engineer-1"), None);
        assert_eq!(parse_distance("senior-rust-engineer"), None);
        assert_eq!(parse_distance(""), None);
    }

    #[test]
    fn negative_distance_still_dispatches_to_radius() {
        // The radius path rejects it with a validation error, which is
        // more useful than a slug lookup that can never match.
        assert_eq!(parse_distance("-5"), Some(-5.0));
    }
}
