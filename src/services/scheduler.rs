use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::domain::ResultRecord;

use super::{extract_results, SearchProvider};

type Job = (usize, String);

/// Runs fetch and extract for a batch of queries on a fixed pool of workers.
///
/// Jobs go through a bounded queue whose capacity equals the worker count.
/// Each worker reports `(index, records)` and the collector puts them back
/// in input order, so completion order never shows in the output.
pub struct Scheduler {
    provider: Arc<dyn SearchProvider>,
    max_workers: usize,
}

impl Scheduler {
    pub fn new(provider: Arc<dyn SearchProvider>, max_workers: usize) -> Self {
        Scheduler {
            provider,
            max_workers: max_workers.max(1),
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub async fn run(&self, queries: Vec<String>) -> Vec<ResultRecord> {
        if queries.is_empty() {
            return vec![];
        }

        let worker_count = self.max_workers.min(queries.len());
        log::info!(
            "Scraping {} queries with {} workers",
            queries.len(),
            worker_count
        );

        let (job_sender, job_receiver) = mpsc::channel::<Job>(worker_count);
        let job_receiver = Arc::new(Mutex::new(job_receiver));
        let (result_sender, mut result_receiver) =
            mpsc::unbounded_channel::<(usize, Vec<ResultRecord>)>();

        let workers: Vec<_> = (0..worker_count)
            .map(|worker_id| {
                tokio::spawn(worker(
                    worker_id,
                    self.provider.clone(),
                    job_receiver.clone(),
                    result_sender.clone(),
                ))
            })
            .collect();
        drop(job_receiver);
        drop(result_sender);

        let producer_queries = queries.clone();
        let producer = tokio::spawn(async move {
            for job in producer_queries.into_iter().enumerate() {
                if job_sender.send(job).await.is_err() {
                    log::error!("All workers exited before the queue drained");
                    break;
                }
            }
        });

        let mut slots: Vec<Option<Vec<ResultRecord>>> = vec![None; queries.len()];
        while let Some((index, records)) = result_receiver.recv().await {
            slots[index] = Some(records);
        }

        if let Err(e) = producer.await {
            log::error!("Job producer failed: {:?}", e);
        }
        for handle in workers {
            if let Err(e) = handle.await {
                log::error!("Scrape worker aborted: {:?}", e);
            }
        }

        let records: Vec<ResultRecord> = slots
            .into_iter()
            .zip(queries.iter())
            .flat_map(|(slot, query)| {
                slot.unwrap_or_else(|| vec![ResultRecord::worker_aborted(query)])
            })
            .collect();

        log::info!("Batch finished with {} records", records.len());
        records
    }
}

async fn worker(
    worker_id: usize,
    provider: Arc<dyn SearchProvider>,
    jobs: Arc<Mutex<mpsc::Receiver<Job>>>,
    results: mpsc::UnboundedSender<(usize, Vec<ResultRecord>)>,
) {
    loop {
        // Lock is released before the job runs so other workers can pick up work
        let job = jobs.lock().await.recv().await;
        let Some((index, query)) = job else {
            break;
        };

        let records = scrape_query(provider.as_ref(), &query).await;
        if results.send((index, records)).is_err() {
            log::error!("Worker {} lost the result collector", worker_id);
            break;
        }
    }
}

/// Fetch and extract one query, folding any failure into its own rows.
pub async fn scrape_query(provider: &dyn SearchProvider, query: &str) -> Vec<ResultRecord> {
    match provider.fetch(query).await {
        Ok(html) => extract_results(query, &html),
        Err(e) => {
            log::error!("Fetch failed for query {}: {}", query, e);
            vec![ResultRecord::http_error(query, e.details())]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use async_trait::async_trait;

    use super::Scheduler;
    use crate::{error::FetchError, services::SearchProvider};

    fn page(titles: &[&str]) -> String {
        let bodies: String = titles
            .iter()
            .map(|t| {
                format!(
                    r#"<div class="result__body"><h2 class="result__title"><a class="result__a" href="https://example.com">{}</a></h2></div>"#,
                    t
                )
            })
            .collect();
        format!("<html><body>{}</body></html>", bodies)
    }

    /// Query format: "<delay_ms>:<rows>", "fail" or "panic".
    struct ScriptedProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        async fn fetch(&self, query: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match query {
                "fail" => Err(FetchError::Provider("connection reset".to_string())),
                "panic" => panic!("provider blew up"),
                _ => {
                    let (delay, rows) = query.split_once(':').unwrap();
                    tokio::time::sleep(Duration::from_millis(delay.parse().unwrap())).await;
                    let titles: Vec<String> = (0..rows.parse::<usize>().unwrap())
                        .map(|i| format!("{} #{}", query, i))
                        .collect();
                    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
                    Ok(page(&titles))
                }
            }
        }
    }

    fn scheduler(workers: usize) -> (Scheduler, Arc<ScriptedProvider>) {
        let provider = Arc::new(ScriptedProvider {
            calls: AtomicUsize::new(0),
        });
        (Scheduler::new(provider.clone(), workers), provider)
    }

    #[tokio::test]
    async fn empty_batch_makes_no_calls() {
        let (scheduler, provider) = scheduler(5);

        let records = scheduler.run(vec![]).await;

        assert!(records.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn output_follows_input_order_regardless_of_latency() {
        let (scheduler, _) = scheduler(3);
        let queries: Vec<String> = ["120:2", "5:1", "60:3", "0:1", "30:2"]
            .iter()
            .map(|q| q.to_string())
            .collect();

        let records = scheduler.run(queries.clone()).await;

        let expected: Vec<String> = queries
            .iter()
            .flat_map(|q| {
                let rows: usize = q.split_once(':').unwrap().1.parse().unwrap();
                (0..rows).map(move |i| format!("{} #{}", q, i))
            })
            .collect();
        let titles: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn failures_stay_with_their_query() {
        let (scheduler, provider) = scheduler(2);
        let queries = vec![
            "10:1".to_string(),
            "fail".to_string(),
            "panic".to_string(),
            "0:2".to_string(),
        ];

        let records = scheduler.run(queries).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].title, "10:1 #0");
        assert_eq!(records[1].query, "fail");
        assert_eq!(records[1].title, "HTTP Error: connection reset");
        assert_eq!(records[1].link, "#");
        assert_eq!(records[2].query, "panic");
        assert_eq!(records[2].title, "ERROR: Worker aborted.");
        assert_eq!(records[3].title, "0:2 #0");
        assert_eq!(records[4].title, "0:2 #1");
    }

    #[tokio::test]
    async fn zero_workers_still_runs() {
        let (scheduler, _) = scheduler(0);

        assert_eq!(scheduler.max_workers(), 1);
        assert_eq!(scheduler.run(vec!["0:1".to_string()]).await.len(), 1);
    }
}
