//! Committee label recovery.
//!
//! The agenda grid puts the committee name in a `td.bpsGridCommittee` cell
//! ahead of the cell holding the document link. The cell reads
//! `Committee name<br>venue, date`; only the part before the break names
//! the committee.

use scraper::node::Node;
use scraper::ElementRef;

pub const COMMITTEE_CELL_CLASS: &str = "bpsGridCommittee";
pub const UNKNOWN_COMMITTEE: &str = "Unknown Committee";

/// Minimal text model of a committee cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitteeCell {
    /// Text before the first `<br>`, when the cell has one
    pub before_break: Option<String>,
    /// All text in the cell
    pub text: String,
}

impl CommitteeCell {
    pub fn from_element(cell: ElementRef<'_>) -> Self {
        let mut before = String::new();
        let mut text = String::new();
        let mut broke = false;

        for node in cell.descendants() {
            match node.value() {
                Node::Element(el) if el.name() == "br" => broke = true,
                Node::Text(t) => {
                    if !broke {
                        before.push_str(t);
                    }
                    text.push_str(t);
                }
                _ => {}
            }
        }

        Self {
            before_break: broke.then_some(before),
            text,
        }
    }
}

/// Label for a document given its committee cell, if one was found.
///
/// A cell whose leading segment is blank falls back to the whole cell text.
pub fn committee_label(cell: Option<&CommitteeCell>) -> String {
    let Some(cell) = cell else {
        return UNKNOWN_COMMITTEE.to_string();
    };

    let leading = cell
        .before_break
        .as_deref()
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty());

    let label = leading.unwrap_or_else(|| collapse_whitespace(&cell.text));
    if label.is_empty() {
        UNKNOWN_COMMITTEE.to_string()
    } else {
        label
    }
}

/// Nearest committee cell preceding the table cell that holds `anchor`.
pub fn find_committee_cell(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let holder = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "td")
        .or_else(|| anchor.parent().and_then(ElementRef::wrap))?;

    holder
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().name() == "td"
                && el.value().classes().any(|c| c == COMMITTEE_CELL_CLASS)
        })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
