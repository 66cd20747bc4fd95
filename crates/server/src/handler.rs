//! HTTP handlers for the staymap API
//!
//! Query parameters are parsed and validated here, before any engine call,
//! so a malformed request never reaches the index.

use crate::protocol::{ErrorBody, NearestHigherResponse, SearchRow, StatsResponse};
use crate::reader::Reader;
use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use staymap::{ErrorKind, StaymapError};
use staymap_types::bbox::BoundingBox;
use staymap_types::listing::ListingId;
use staymap_types::query::{ListingSummary, QueryFilter};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned by a handler, rendered as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] StaymapError),

    #[error("query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("no such endpoint: {0}")]
    NoRoute(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Engine(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NoRoute(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {}", self);
        } else {
            debug!("request rejected: {}", self);
        }

        let parameter = match &self {
            Self::Engine(err) => err.field().map(str::to_string),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            parameter,
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Typed access to raw query parameters.
pub struct Params<'a>(pub &'a HashMap<String, String>);

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Engine(StaymapError::InvalidInput(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Engine(StaymapError::invalid_parameter("id", rejection.body_text()))
    }
}

impl Params<'_> {
    pub fn required_f64(&self, name: &'static str) -> Result<f64, StaymapError> {
        let raw = self
            .0
            .get(name)
            .ok_or(StaymapError::MissingParameter(name))?;
        parse_f64(name, raw)
    }

    pub fn optional_f64(&self, name: &'static str) -> Result<Option<f64>, StaymapError> {
        self.0.get(name).map(|raw| parse_f64(name, raw)).transpose()
    }

    pub fn optional_usize(&self, name: &'static str) -> Result<Option<usize>, StaymapError> {
        self.0
            .get(name)
            .map(|raw| {
                raw.trim().parse::<usize>().map_err(|_| {
                    StaymapError::invalid_parameter(
                        name,
                        format!("expected a non-negative integer, got {:?}", raw),
                    )
                })
            })
            .transpose()
    }

    pub fn date(&self, name: &'static str) -> Result<NaiveDate, StaymapError> {
        let raw = self
            .0
            .get(name)
            .ok_or(StaymapError::MissingParameter(name))?;
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
            StaymapError::invalid_parameter(
                name,
                format!("invalid date format {:?}, expected YYYY-MM-DD", raw),
            )
        })
    }

    /// `min_lat`, `min_lng`, `max_lat`, `max_lng` as a box.
    pub fn bounding_box(&self) -> Result<BoundingBox, StaymapError> {
        let min_lat = self.required_f64("min_lat")?;
        let min_lng = self.required_f64("min_lng")?;
        let max_lat = self.required_f64("max_lat")?;
        let max_lng = self.required_f64("max_lng")?;
        Ok(BoundingBox::new(min_lat, min_lng, max_lat, max_lng)?)
    }

    /// `date`, plus optional `min_rating` and `max_price`.
    pub fn filter(&self) -> Result<QueryFilter, StaymapError> {
        let mut filter = QueryFilter::on(self.date("date")?);
        if let Some(min_rating) = self.optional_f64("min_rating")? {
            filter = filter.with_min_rating(min_rating);
        }
        if let Some(max_price) = self.optional_f64("max_price")? {
            filter = filter.with_max_price(max_price);
        }
        Ok(filter)
    }
}

fn parse_f64(name: &'static str, raw: &str) -> Result<f64, StaymapError> {
    raw.trim().parse::<f64>().map_err(|_| {
        StaymapError::invalid_parameter(name, format!("expected a number, got {:?}", raw))
    })
}

/// `GET /api/search_rectangle`
pub async fn search_rectangle(
    State(reader): State<Reader>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Vec<SearchRow>> {
    let Query(query) = query?;
    let params = Params(&query);
    let bbox = params.bounding_box()?;
    let filter = params.filter()?;

    let rows = tokio::task::spawn_blocking(move || reader.search_rectangle(&bbox, &filter))
        .await??;
    Ok(Json(rows))
}

/// `GET /api/stats`
pub async fn stats(
    State(reader): State<Reader>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<StatsResponse> {
    let Query(query) = query?;
    let bbox = Params(&query).bounding_box()?;

    let stats = tokio::task::spawn_blocking(move || reader.stats(&bbox)).await??;
    Ok(Json(stats))
}

/// `GET /api/nearest_higher/{id}`
pub async fn nearest_higher(
    State(reader): State<Reader>,
    raw_id: Result<Path<String>, PathRejection>,
) -> ApiResult<NearestHigherResponse> {
    let Path(raw_id) = raw_id?;
    let id: ListingId = raw_id.parse().map_err(|_| {
        StaymapError::invalid_parameter("id", format!("expected a listing id, got {:?}", raw_id))
    })?;

    let nearest = tokio::task::spawn_blocking(move || reader.nearest_higher(id)).await??;
    Ok(Json(nearest))
}

/// `GET /api/listings`
pub async fn listings(
    State(reader): State<Reader>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Vec<ListingSummary>> {
    let Query(query) = query?;
    let limit = Params(&query).optional_usize("limit")?;
    Ok(Json(reader.list(limit)))
}

/// Any path outside the API.
pub async fn no_route(uri: Uri) -> ApiError {
    ApiError::NoRoute(uri.path().to_string())
}

/// A known path requested with a method other than `GET`.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}
