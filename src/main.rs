use std::{net::TcpListener, sync::Arc};

use anyhow::Context;
use env_logger::Env;
use serp_analyzer::{
    configuration::get_configuration,
    services::{DuckDuckGo, ResultStore, Scheduler, SerpAnalyzer},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let provider = DuckDuckGo::new(&configuration.scraper)?;
    let scheduler = Scheduler::new(Arc::new(provider), configuration.scraper.max_workers);
    let store = ResultStore::new(&configuration.storage.results_file);
    let analyzer = SerpAnalyzer::new(scheduler, store);

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;
    log::info!("Listening on {}", address);

    run(listener, analyzer)?.await?;
    Ok(())
}
