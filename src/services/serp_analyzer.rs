use crate::{
    domain::{ScrapeReport, Snapshot},
    error::PersistenceError,
};

use super::{analyze_titles, ResultStore, Scheduler};

/// Scrape, analyze and persist a batch; serve the last saved batch back.
pub struct SerpAnalyzer {
    scheduler: Scheduler,
    store: ResultStore,
}

impl SerpAnalyzer {
    pub fn new(scheduler: Scheduler, store: ResultStore) -> Self {
        SerpAnalyzer { scheduler, store }
    }

    pub async fn scrape(&self, queries: Vec<String>) -> Result<ScrapeReport, PersistenceError> {
        let data = self.scheduler.run(queries).await;
        let analysis = analyze_titles(&data);
        let snapshot = Snapshot { data, analysis };

        self.store.save(&snapshot).await?;

        Ok(snapshot.into())
    }

    pub async fn latest(&self) -> Result<Snapshot, PersistenceError> {
        self.store.load().await
    }
}
