use serde::{Deserialize, Serialize};

use super::serp_result::{AnalysisEntry, ResultRecord};

/// The unit of persistence: raw rows plus their keyword analysis.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub data: Vec<ResultRecord>,
    pub analysis: Vec<AnalysisEntry>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct ScrapeReport {
    pub status: String,
    pub total_results: usize,
    pub data: Vec<ResultRecord>,
    pub analysis: Vec<AnalysisEntry>,
}

impl From<Snapshot> for ScrapeReport {
    fn from(snapshot: Snapshot) -> Self {
        ScrapeReport {
            status: "success".to_string(),
            total_results: snapshot.data.len(),
            data: snapshot.data,
            analysis: snapshot.analysis,
        }
    }
}
