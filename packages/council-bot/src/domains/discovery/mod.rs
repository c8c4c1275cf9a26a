//! Discovery: which agenda documents on the council page are new.

pub mod committee;
pub mod scanner;

pub use committee::{committee_label, CommitteeCell, UNKNOWN_COMMITTEE};
pub use scanner::{extract_candidates, is_agenda_document, DiscoveredLink, DiscoveryScanner};
