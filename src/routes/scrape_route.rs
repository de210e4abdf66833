use actix_web::{error::JsonPayloadError, post, web, HttpResponse};
use serde::Deserialize;

use crate::{error::ApiError, services::SerpAnalyzer};

const NO_QUERIES: &str = "No queries provided";

#[derive(Deserialize)]
pub struct ScrapeBody {
    queries: Option<Vec<String>>,
}

#[post("/scrape")]
async fn scrape(
    analyzer: web::Data<SerpAnalyzer>,
    body: Result<web::Json<ScrapeBody>, actix_web::Error>,
) -> Result<HttpResponse, ApiError> {
    let body = body.map_err(|e| {
        log::warn!("Rejected scrape request body: {}", e);
        rejected_body(&e)
    })?;

    let queries = body
        .into_inner()
        .queries
        .ok_or_else(|| ApiError::Validation(NO_QUERIES.to_string()))?;

    let report = analyzer.scrape(queries).await.map_err(|e| {
        log::error!("Failed to persist scrape results: {}", e);
        ApiError::Save(e)
    })?;

    Ok(HttpResponse::Ok().json(report))
}

/// No JSON body at all reads as missing queries; anything else keeps its reason.
fn rejected_body(err: &actix_web::Error) -> ApiError {
    match err.as_error::<JsonPayloadError>() {
        Some(JsonPayloadError::ContentType) | None => ApiError::Validation(NO_QUERIES.to_string()),
        Some(reason) => ApiError::Validation(format!("Invalid request body: {}", reason)),
    }
}
