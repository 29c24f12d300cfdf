use crate::api::models::*;
use crate::storage::ReviewFilter;
use axum::{
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::Response,
};
use tracing::info;

pub async fn list_reviews_handler(
    State(state): State<AppState>,
    query: Result<Query<Pairs>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(pairs) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let filter = ReviewFilter::try_from(ReviewQuery::from(pairs))?;

    info!(
        location = ?filter.location,
        start_date = ?filter.start_date,
        end_date = ?filter.end_date,
        "Listing reviews"
    );

    let selected = state.store.query(&filter).await?;

    // Lexicon scoring is CPU bound; keep it off the async workers
    let analyzer = state.analyzer.clone();
    let mut scored = tokio::task::spawn_blocking(move || {
        selected
            .into_iter()
            .map(|review| ScoredReview {
                sentiment: analyzer.analyze(&review.review_body),
                review,
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Sentiment scoring failed: {}", e)))?;

    // Stable, so equal scores keep collection order
    scored.sort_by(|a, b| b.sentiment.compound.total_cmp(&a.sentiment.compound));

    info!(found = scored.len(), "Reviews scored");

    Ok(json_response(StatusCode::OK, &scored))
}

pub async fn create_review_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let form = NewReviewForm::from(decode_form(&body)?);
    let review = form.into_review()?;

    info!(review_id = %review.review_id, location = %review.location, "Adding review");

    state.store.append(review.clone()).await;

    Ok(json_response(StatusCode::CREATED, &review))
}

pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
