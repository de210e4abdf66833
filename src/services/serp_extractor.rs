use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use scraper::{Html, Selector};

use crate::domain::{ResultRecord, PLACEHOLDER_LINK};

const REDIRECT_PREFIX: &str = "//duckduckgo.com/l/?uddg=";

static RESULT_BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".result__body").unwrap());
static TITLE_ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".result__title .result__a").unwrap());

/// Turns a result page into rows. Never returns an empty list.
pub fn extract_results(query: &str, html: &str) -> Vec<ResultRecord> {
    let document = Html::parse_document(html);

    let results: Vec<ResultRecord> = document
        .select(&RESULT_BODY)
        .filter_map(|body| body.select(&TITLE_ANCHOR).next())
        .map(|anchor| {
            let title: String = anchor
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            let link = match anchor.value().attr("href") {
                Some(href) => resolve_link(href),
                None => PLACEHOLDER_LINK.to_string(),
            };

            ResultRecord::new(query, title, link)
        })
        .collect();

    if results.is_empty() {
        log::warn!("Selectors matched nothing for query: {}", query);
        return vec![ResultRecord::selectors_failed(query)];
    }

    log::info!("Extracted {} results for query: {}", results.len(), query);
    results
}

/// Unwraps the provider's tracking redirect, otherwise returns `href` untouched.
pub fn resolve_link(href: &str) -> String {
    match href.strip_prefix(REDIRECT_PREFIX) {
        Some(rest) => {
            let encoded = rest.split('&').next().unwrap_or_default();
            percent_decode_str(encoded).decode_utf8_lossy().into_owned()
        }
        None => href.to_string(),
    }
}
