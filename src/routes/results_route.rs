use actix_web::{get, web, HttpResponse};

use crate::{error::ApiError, services::SerpAnalyzer};

#[get("/results")]
async fn results(analyzer: web::Data<SerpAnalyzer>) -> Result<HttpResponse, ApiError> {
    let snapshot = analyzer.latest().await.map_err(|e| {
        log::error!("Failed to load saved results: {}", e);
        ApiError::Load(e)
    })?;

    Ok(HttpResponse::Ok().json(snapshot))
}
