use std::net::TcpListener;

use actix_web::{
    dev::Server,
    http::Method,
    middleware::{DefaultHeaders, Logger},
    web::{self, Data},
    App, HttpRequest, HttpResponse, HttpServer,
};

use crate::{
    routes::{default_route, results_route, scrape_route},
    services::SerpAnalyzer,
};

/// Headers that let a browser front-end served from another origin call the API.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

/// Answers preflight requests; anything else unrouted is a 404.
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    match *req.method() {
        Method::OPTIONS => HttpResponse::NoContent().finish(),
        _ => HttpResponse::NotFound().finish(),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(default_route::default)
        .service(scrape_route::scrape)
        .service(results_route::results);
}

pub fn run(listener: TcpListener, analyzer: SerpAnalyzer) -> Result<Server, std::io::Error> {
    let analyzer = Data::new(analyzer);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors_headers())
            .configure(configure)
            .default_service(web::to(fallback))
            .app_data(analyzer.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
