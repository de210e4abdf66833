use crate::domain::{AnalysisEntry, ResultRecord};

/// Keyword vocabulary, in tie-break order.
pub const KEYWORDS: [&str; 10] = [
    "cnn",
    "rnn",
    "lstm",
    "transformer",
    "gan",
    "bert",
    "yolo",
    "neural",
    "machine",
    "artificial",
];

/// Counts, per keyword, the titles containing it as a case-insensitive substring.
/// Zero counts are dropped and the rest sorted by count, highest first.
pub fn analyze_titles(records: &[ResultRecord]) -> Vec<AnalysisEntry> {
    let mut counts = [0usize; KEYWORDS.len()];

    for record in records {
        let title = record.title.to_lowercase();
        for (count, keyword) in counts.iter_mut().zip(KEYWORDS) {
            if title.contains(keyword) {
                *count += 1;
            }
        }
    }

    let mut analysis: Vec<AnalysisEntry> = KEYWORDS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(keyword, count)| AnalysisEntry {
            name: keyword.to_uppercase(),
            count,
        })
        .collect();

    // Stable, so equal counts keep vocabulary order
    analysis.sort_by(|a, b| b.count.cmp(&a.count));
    analysis
}
