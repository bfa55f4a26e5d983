use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::{
    error::CheckError,
    markup::{HtmlNode, MarkupNode, nearest_ancestor_of_text},
    text_manipulators::extract_text,
};

/// Counter names in the order their cells appear in a section row.
pub const COUNTER_LABELS: [&str; 6] = [
    "Seats",
    "Seats Taken",
    "Seats Available",
    "Waitlist Capacity",
    "Waitlist Total",
    "Waitlist Remaining",
];

// The section table's layout puts "Cap" in column 10, with the five other
// counters right after it. Nothing on the page labels these cells reliably,
// so a redesign upstream will break this.
const FIRST_COUNTER_CELL: usize = 10;
const MIN_ROW_CELLS: usize = FIRST_COUNTER_CELL + COUNTER_LABELS.len();

static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static INTEGER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+$").unwrap());

/// Seat and waitlist counters read off one section row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityRecord {
    pub subject: String,
    pub course: String,
    pub seats: String,
    pub seats_taken: String,
    pub seats_available: String,
    pub waitlist_capacity: String,
    pub waitlist_total: String,
    pub waitlist_remaining: String,
}

impl AvailabilityRecord {
    /// `(label, value)` pairs in [`COUNTER_LABELS`] order.
    pub fn counters(&self) -> [(&'static str, &str); 6] {
        [
            (COUNTER_LABELS[0], self.seats.as_str()),
            (COUNTER_LABELS[1], self.seats_taken.as_str()),
            (COUNTER_LABELS[2], self.seats_available.as_str()),
            (COUNTER_LABELS[3], self.waitlist_capacity.as_str()),
            (COUNTER_LABELS[4], self.waitlist_total.as_str()),
            (COUNTER_LABELS[5], self.waitlist_remaining.as_str()),
        ]
    }

    /// Human readable summary, one counter per line under a `SUBJ NUM` heading.
    pub fn report(&self) -> String {
        let mut lines = vec![format!("{} {}", self.subject, self.course)];
        lines.extend(
            self.counters()
                .iter()
                .map(|(label, value)| format!("{label}: {value}")),
        );
        lines.join("\n")
    }
}

/// Finds the row for `course` in a section listing and reads its counters.
///
/// The course cell must match exactly once trimmed, so "140" never picks up
/// a "1400" row. When several sections list the course, the first one wins.
pub fn parse_waitlist(
    html: &str,
    subject: &str,
    course: &str,
) -> Result<AvailabilityRecord, CheckError> {
    let document = Html::parse_document(html);

    let row = nearest_ancestor_of_text(HtmlNode::root(&document), course, |node| {
        node.tag_name() == Some("tr")
    })
    .and_then(|node| node.as_element())
    .ok_or_else(|| CheckError::Extraction(format!("course {course} not found")))?;

    let cells: Vec<String> = row.select(&CELL_SELECTOR).map(extract_text).collect();
    if cells.len() < MIN_ROW_CELLS {
        return Err(CheckError::Extraction(format!(
            "malformed row for {subject} {course}: expected at least {MIN_ROW_CELLS} cells, found {}",
            cells.len()
        )));
    }

    let values = &cells[FIRST_COUNTER_CELL..MIN_ROW_CELLS];
    for (label, value) in COUNTER_LABELS.iter().zip(values) {
        if !INTEGER_REGEX.is_match(value) {
            return Err(CheckError::Extraction(format!(
                "{label} for {subject} {course} is not a number: {value:?}"
            )));
        }
    }

    Ok(AvailabilityRecord {
        subject: subject.to_string(),
        course: course.to_string(),
        seats: values[0].clone(),
        seats_taken: values[1].clone(),
        seats_available: values[2].clone(),
        waitlist_capacity: values[3].clone(),
        waitlist_total: values[4].clone(),
        waitlist_remaining: values[5].clone(),
    })
}
