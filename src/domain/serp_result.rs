use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_LINK: &str = "#";
pub const SELECTORS_FAILED_TITLE: &str = "ERROR: No data found. Selectors failed.";
pub const WORKER_ABORTED_TITLE: &str = "ERROR: Worker aborted.";

/// One row of a search results page.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub query: String,
    pub title: String,
    pub link: String,
}

impl ResultRecord {
    pub fn new(query: &str, title: String, link: String) -> Self {
        ResultRecord {
            query: query.to_string(),
            title,
            link,
        }
    }

    pub fn http_error(query: &str, details: impl std::fmt::Display) -> Self {
        Self::new(
            query,
            format!("HTTP Error: {}", details),
            PLACEHOLDER_LINK.to_string(),
        )
    }

    pub fn selectors_failed(query: &str) -> Self {
        Self::new(
            query,
            SELECTORS_FAILED_TITLE.to_string(),
            PLACEHOLDER_LINK.to_string(),
        )
    }

    pub fn worker_aborted(query: &str) -> Self {
        Self::new(
            query,
            WORKER_ABORTED_TITLE.to_string(),
            PLACEHOLDER_LINK.to_string(),
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub name: String,
    pub count: usize,
}
