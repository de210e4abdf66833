use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{
    header::{ACCEPT_LANGUAGE, USER_AGENT},
    Client,
};
use serde::Serialize;
use url::Url;

use crate::{configuration::ScraperSettings, error::FetchError};

/// Source of raw result pages for a query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<String, FetchError>;
}

/// Scrapes the DuckDuckGo HTML front-end.
pub struct DuckDuckGo {
    client: Client,
    url: Url,
    user_agent: String,
    accept_language: String,
    delay_range_ms: (u64, u64),
}

#[derive(Serialize)]
struct SearchForm<'a> {
    q: &'a str,
}

impl DuckDuckGo {
    pub fn new(settings: &ScraperSettings) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        let url = Url::parse(&settings.endpoint)?;

        Ok(DuckDuckGo {
            client,
            url,
            user_agent: settings.user_agent.clone(),
            accept_language: settings.accept_language.clone(),
            delay_range_ms: settings.delay_range_ms(),
        })
    }

    fn pacing_delay(&self) -> Duration {
        let (min, max) = self.delay_range_ms;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    async fn fetch(&self, query: &str) -> Result<String, FetchError> {
        // Keeps concurrent workers from hitting the provider in lockstep
        tokio::time::sleep(self.pacing_delay()).await;

        let res = self
            .client
            .post(self.url.clone())
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .form(&SearchForm { q: query })
            .send()
            .await?
            .error_for_status()?;

        Ok(res.text().await?)
    }
}
