#![allow(dead_code)]

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use serp_analyzer::{error::FetchError, services::SearchProvider};

pub fn result_page(titles: &[&str]) -> String {
    let bodies: String = titles
        .iter()
        .map(|t| {
            format!(
                r#"<div class="result__body"><h2 class="result__title"><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2F{}&amp;rut=1">{}</a></h2></div>"#,
                t.len(),
                t
            )
        })
        .collect();
    format!("<html><body>{}</body></html>", bodies)
}

/// Serves one canned result per query and records how many fetches overlap.
pub struct CountingProvider {
    latency: Duration,
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(latency: Duration) -> Self {
        CountingProvider {
            latency,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for CountingProvider {
    async fn fetch(&self, query: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.latency).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(result_page(&[&format!("{} CNN", query)]))
    }
}
