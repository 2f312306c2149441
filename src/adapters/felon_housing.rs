//! Adapter for the felon-friendly housing table.
//!
//! Every listing packs its name and contact lines into the first cell; the
//! next fifteen columns record admission policy per offence category.
//! Lines are sorted into fields by [`classify_line`], a best-effort
//! heuristic rather than a reliable classifier.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::extract::{has_email, has_phone, has_scheme, has_url, split_web_email};
use crate::model::{EntityRecord, HOUSING, HOUSING_FELON_FRIENDLY};
use crate::normalize::{is_placeholder, normalize_name};
use crate::store::{DETAILS_SEPARATOR, DetailsMerge, RecordStore};
use crate::summary::StageCounts;
use crate::table::cell;

pub const HOUSING_FELON_FRIENDLY_TABLE: &str = "Housing-Felon-Friendly";

/// Policy headers used when the table carries no header row.
pub const POLICY_COLUMNS: [&str; 15] = [
    "Sex Offenses",
    "Violence Against Other Person",
    "Destruction of Property",
    "Controlled Substance",
    "Manuf Controlled Substance",
    "Arson",
    "Lifetime Sex Offender Registry",
    "Sex Crimes Last 5 Years",
    "On Any SO List",
    "Medicaid",
    "Private Pay",
    "Medicare",
    "M/F/A",
    "Children Allowed",
    "Pets Allowed",
];

/// Address hints looked for (as substrings) in lower-cased lines.
const ADDRESS_HINTS: [&str; 9] = ["st", "ave", "blvd", "dr", "ln", "rd", "way", "co ", "colorado"];

const POLICY_PREFIX: &str = "Policy — ";

/// Cuts price and unit notes off the first line of a listing.
static NAME_CUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}|\$|\bfor\b").expect("valid name cut regex"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{3,}").expect("valid digit run regex"));

/// What a line inside the listing cell was taken to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Phone,
    Link,
    Email,
    Address,
    Note,
}

/// Input to a classification rule.
struct LineContext<'a> {
    line: &'a str,
    link_seen: bool,
}

/// Ordered rules; the first one that matches decides the kind.
const LINE_RULES: [(LineKind, fn(&LineContext<'_>) -> bool); 4] = [
    (LineKind::Phone, is_phone_line),
    (LineKind::Link, is_link_line),
    (LineKind::Email, is_email_line),
    (LineKind::Address, is_address_line),
];

/// Classifies one line of a listing cell. `link_seen` tells whether an
/// earlier line already supplied a link.
pub fn classify_line(line: &str, link_seen: bool) -> LineKind {
    let ctx = LineContext { line, link_seen };
    LINE_RULES
        .iter()
        .find(|(_, rule)| rule(&ctx))
        .map_or(LineKind::Note, |(kind, _)| *kind)
}

/// Phone numbers only count until a link was seen, and never inside a URL.
fn is_phone_line(ctx: &LineContext<'_>) -> bool {
    has_phone(ctx.line) && !ctx.link_seen && !has_scheme(ctx.line)
}

fn is_link_line(ctx: &LineContext<'_>) -> bool {
    has_url(ctx.line)
}

fn is_email_line(ctx: &LineContext<'_>) -> bool {
    has_email(ctx.line)
}

fn is_address_line(ctx: &LineContext<'_>) -> bool {
    let lower = ctx.line.to_lowercase();
    DIGIT_RUN.is_match(ctx.line) && ADDRESS_HINTS.iter().any(|hint| lower.contains(hint))
}

/// Extracts the organisation name from the first line of a listing.
pub fn listing_name(first_line: &str) -> String {
    let head = NAME_CUT.split(first_line).next().unwrap_or("");
    head.trim().trim_end_matches('-').trim().to_string()
}

/// Adds every listing to the store. Listing details go in front of whatever
/// the store already knows.
#[instrument(level = "info", skip_all, fields(rows = rows.len()))]
pub fn add_felon_friendly_housing(rows: &[Vec<String>], store: &mut RecordStore) -> StageCounts {
    let headers: Vec<String> = match rows.get(1) {
        Some(header_row) => header_row
            .iter()
            .skip(1)
            .take(POLICY_COLUMNS.len())
            .map(|header| header.trim().to_string())
            .collect(),
        None => POLICY_COLUMNS.iter().map(|header| header.to_string()).collect(),
    };

    let mut counts = StageCounts::default();
    for row in rows.iter().skip(2) {
        if let Some(record) = listing_record(row, &headers) {
            counts.record(store.upsert(record, DetailsMerge::Prepend));
        }
    }
    counts
}

fn listing_record(row: &[String], headers: &[String]) -> Option<EntityRecord> {
    let listing = cell(row, 0);
    let first_line = listing.split('\n').next().unwrap_or("");
    if listing.is_empty() || is_placeholder(&normalize_name(first_line)) {
        return None;
    }

    let lines: Vec<&str> = listing
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let (first, rest) = lines.split_first()?;

    let mut record = EntityRecord::new(listing_name(first));
    record.tags = BTreeSet::from([HOUSING.to_string(), HOUSING_FELON_FRIENDLY.to_string()]);

    let mut notes: Vec<&str> = Vec::new();
    for &line in rest {
        match classify_line(line, !record.web_link.is_empty()) {
            LineKind::Phone => fill(&mut record.phone, line),
            LineKind::Link => {
                let contact = split_web_email(line);
                fill(&mut record.web_link, &contact.url);
                fill(&mut record.email, &contact.email);
            }
            LineKind::Email => fill(&mut record.email, line),
            LineKind::Address => fill(&mut record.physical_address, line),
            LineKind::Note => notes.push(line),
        }
    }

    let policy = policy_fragments(row, headers);
    let mut details = Vec::new();
    if !notes.is_empty() {
        details.push(notes.join(" "));
    }
    if !policy.is_empty() {
        details.push(format!("{POLICY_PREFIX}{}", policy.join(", ")));
    }
    record.details = details.join(DETAILS_SEPARATOR);

    debug!(name = %record.name, "parsed housing listing");
    Some(record)
}

/// Renders non-empty, known policy cells as `Header: value`.
fn policy_fragments(row: &[String], headers: &[String]) -> Vec<String> {
    (0..POLICY_COLUMNS.len())
        .filter_map(|offset| {
            let value = cell(row, offset + 1);
            if value.is_empty() || value.eq_ignore_ascii_case("UNK") {
                return None;
            }
            let header = headers
                .get(offset)
                .cloned()
                .unwrap_or_else(|| format!("Col{offset}"));
            Some(format!("{header}: {value}"))
        })
        .collect()
}

fn fill(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.to_string();
    }
}
