use std::collections::HashSet;
use std::sync::Arc;

use scraper::{Html, Selector};
use tracing::{debug, error, info};
use url::Url;

use super::committee::{committee_label, find_committee_cell, CommitteeCell};
use crate::domains::catalog::{CatalogResult, LinkCatalog};
use crate::kernel::BaseHttpFetcher;

const AGENDA_EXTENSION: &str = ".pdf";
const AGENDA_MARKER: &str = "AGN";
const SUPPLEMENTARY_MARKER: &str = "SUP";

/// An agenda document found on the council page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLink {
    pub label: String,
    pub url: String,
}

fn has_agenda_extension(href: &str) -> bool {
    href.to_ascii_lowercase().ends_with(AGENDA_EXTENSION)
}

/// Whether a link target names a main agenda document.
///
/// Markers are matched case-sensitively; the extension is not.
pub fn is_agenda_document(href: &str) -> bool {
    has_agenda_extension(href) && href.contains(AGENDA_MARKER) && !href.contains(SUPPLEMENTARY_MARKER)
}

/// Extract agenda links from the council page, in page order.
///
/// `scan_limit` caps how many `.pdf` anchors are looked at before the
/// marker filter runs. Relative targets are resolved against `base`.
pub fn extract_candidates(html: &str, base: &Url, scan_limit: Option<usize>) -> Vec<DiscoveredLink> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let pdf_anchors = document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href").map(|href| (a, href.trim())))
        .filter(|(_, href)| has_agenda_extension(href))
        .take(scan_limit.unwrap_or(usize::MAX));

    for (anchor, href) in pdf_anchors {
        if !is_agenda_document(href) {
            continue;
        }

        let url = match base.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                debug!(href = %href, error = %e, "Skipping unresolvable agenda link");
                continue;
            }
        };

        if !seen.insert(url.clone()) {
            continue;
        }

        let cell = find_committee_cell(anchor).map(CommitteeCell::from_element);
        links.push(DiscoveredLink {
            label: committee_label(cell.as_ref()),
            url,
        });
    }

    links
}

/// Finds agenda documents on the council page that the catalog hasn't seen.
pub struct DiscoveryScanner {
    fetcher: Arc<dyn BaseHttpFetcher>,
    council_url: Url,
    scan_limit: Option<usize>,
}

impl DiscoveryScanner {
    pub fn new(fetcher: Arc<dyn BaseHttpFetcher>, council_url: Url, scan_limit: Option<usize>) -> Self {
        Self {
            fetcher,
            council_url,
            scan_limit,
        }
    }

    /// Unseen agenda links in page order.
    ///
    /// A page that can't be fetched yields nothing for this run. Catalog
    /// failures are returned to the caller.
    pub async fn discover(&self, catalog: &LinkCatalog) -> CatalogResult<Vec<DiscoveredLink>> {
        let html = match self.fetcher.fetch_text(self.council_url.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                error!(url = %self.council_url, error = %e, "Failed to fetch council page");
                return Ok(Vec::new());
            }
        };

        let candidates = extract_candidates(&html, &self.council_url, self.scan_limit);
        let found = candidates.len();

        let mut unseen = Vec::with_capacity(found);
        for link in candidates {
            if catalog.contains(&link.url).await? {
                debug!(url = %link.url, "Already catalogued");
                continue;
            }
            unseen.push(link);
        }

        info!(found, new = unseen.len(), "Agenda discovery complete");
        Ok(unseen)
    }
}
