use crate::sentiment::{SentimentAnalyzer, SentimentScores};
use crate::storage::review::DATE_FORMAT;
use crate::storage::{Review, ReviewFilter, ReviewStore, TimestampError};
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Locations accepted for new reviews
pub const VALID_LOCATIONS: [&str; 18] = [
    "Albuquerque, New Mexico",
    "Carlsbad, California",
    "Chula Vista, California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

pub fn is_valid_location(location: &str) -> bool {
    VALID_LOCATIONS.contains(&location)
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReviewStore>,
    pub analyzer: Arc<dyn SentimentAnalyzer>,
}

/// Decoded `key=value` pairs in request order
pub type Pairs = Vec<(String, String)>;

/// First non-empty value for `key`. Repeats after it are ignored.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.clone())
}

/// Decode a urlencoded body regardless of its declared content type
pub fn decode_form(body: &[u8]) -> Result<Pairs, AppError> {
    serde_urlencoded::from_bytes(body).map_err(|e| AppError::BadRequest(format!("Failed to decode form body: {}", e)))
}

/// Query string of `GET /`
#[derive(Debug, Default)]
pub struct ReviewQuery {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<Pairs> for ReviewQuery {
    fn from(pairs: Pairs) -> Self {
        Self {
            location: first_value(&pairs, "location"),
            start_date: first_value(&pairs, "start_date"),
            end_date: first_value(&pairs, "end_date"),
        }
    }
}

/// Form body of `POST /`
#[derive(Debug, Default)]
pub struct NewReviewForm {
    pub review_body: Option<String>,
    pub location: Option<String>,
}

impl From<Pairs> for NewReviewForm {
    fn from(pairs: Pairs) -> Self {
        Self {
            review_body: first_value(&pairs, "ReviewBody"),
            location: first_value(&pairs, "Location"),
        }
    }
}

/// A review with its sentiment attached, only ever built for a response
#[derive(Debug, Serialize)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub sentiment: SentimentScores,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_reviews: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Serialize `value` as a JSON body with explicit content type and length
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            status,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
                (header::CONTENT_LENGTH, HeaderValue::from(body.len())),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Blank parameters count as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(param: &'static str, value: Option<String>) -> Result<Option<NaiveDate>, AppError> {
    non_empty(value)
        .map(|v| {
            NaiveDate::parse_from_str(&v, DATE_FORMAT).map_err(|_| AppError::InvalidDate { param, value: v })
        })
        .transpose()
}

impl TryFrom<ReviewQuery> for ReviewFilter {
    type Error = AppError;

    fn try_from(query: ReviewQuery) -> Result<Self, Self::Error> {
        Ok(ReviewFilter {
            location: non_empty(query.location),
            start_date: parse_date("start_date", query.start_date)?,
            end_date: parse_date("end_date", query.end_date)?,
        })
    }
}

impl NewReviewForm {
    /// Validate the form and build the review it describes
    pub fn into_review(self) -> Result<Review, AppError> {
        let (Some(review_body), Some(location)) = (non_empty(self.review_body), non_empty(self.location)) else {
            return Err(AppError::MissingFields);
        };

        if !is_valid_location(&location) {
            return Err(AppError::InvalidLocation);
        }

        Ok(Review::new(review_body, location))
    }
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing ReviewBody or Location")]
    MissingFields,

    #[error("Invalid Location")]
    InvalidLocation,

    #[error("Invalid {param}: expected YYYY-MM-DD, got {value:?}")]
    InvalidDate { param: &'static str, value: String },

    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(#[from] TimestampError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Not Found")]
    NotFound,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields
            | AppError::InvalidLocation
            | AppError::InvalidDate { .. }
            | AppError::MalformedTimestamp(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::MalformedTimestamp(err) => warn!("Stored review is unreadable: {}", err),
            AppError::Internal(msg) => error!("Internal error: {}", msg),
            _ => {}
        }

        let mut response = json_response(status, &ErrorResponse { error: self.to_string() });
        if matches!(self, AppError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, POST"));
        }
        response
    }
}
