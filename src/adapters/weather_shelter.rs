//! Adapter for the wide cold-weather shelter table.
//!
//! Row 0 holds a free-text note about activation thresholds, row 1 the
//! column names, and data starts on row 2.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::extract::split_web_email;
use crate::model::{EntityRecord, HOUSING, WEATHER_SHELTER};
use crate::store::{DETAILS_SEPARATOR, DetailsMerge, RecordStore};
use crate::summary::StageCounts;
use crate::table::cell;

pub const WEATHER_SHELTER_TABLE: &str = "Weather-Shelter";

const NAME: usize = 0;
const COUNTY: usize = 1;
const THRESHOLD: usize = 2;
const PHONE: usize = 3;
const EMAIL: usize = 4;
const ADDRESS: usize = 5;
const HOURS: usize = 6;
const POPULATION: usize = 7;
const VOUCHERS: usize = 8;
const RESERVATION: usize = 9;
const PETS: usize = 10;
const WEBSITE: usize = 11;
const NOTES: usize = 12;

/// Labelled columns folded into the details text, in output order.
const LABELLED_COLUMNS: [(usize, &str); 7] = [
    (COUNTY, "County/Region"),
    (THRESHOLD, "Activation"),
    (HOURS, "Hours"),
    (POPULATION, "Serves"),
    (VOUCHERS, "Shelter/Voucher"),
    (RESERVATION, "Reservation required"),
    (PETS, "Pets allowed"),
];

/// Adds every shelter row to the store. Shelter details go in front of
/// whatever the store already knows about the organisation.
#[instrument(level = "info", skip_all, fields(rows = rows.len()))]
pub fn add_weather_shelters(rows: &[Vec<String>], store: &mut RecordStore) -> StageCounts {
    let threshold_note = rows.first().map(|row| cell(row, 0)).unwrap_or("");

    let mut counts = StageCounts::default();
    for row in rows.iter().skip(2) {
        if let Some(record) = shelter_record(row, threshold_note) {
            counts.record(store.upsert(record, DetailsMerge::Prepend));
        }
    }
    counts
}

fn shelter_record(row: &[String], threshold_note: &str) -> Option<EntityRecord> {
    let name = cell(row, NAME);
    if name.is_empty() {
        return None;
    }

    let contact = split_web_email(cell(row, WEBSITE));
    let email = if contact.email.is_empty() {
        cell(row, EMAIL).to_string()
    } else {
        contact.email
    };

    Some(EntityRecord {
        name: name.to_string(),
        phone: cell(row, PHONE).to_string(),
        web_link: contact.url,
        email,
        physical_address: cell(row, ADDRESS).to_string(),
        details: shelter_details(row, threshold_note),
        tags: BTreeSet::from([WEATHER_SHELTER.to_string(), HOUSING.to_string()]),
    })
}

fn shelter_details(row: &[String], threshold_note: &str) -> String {
    let mut parts: Vec<String> = LABELLED_COLUMNS
        .iter()
        .filter_map(|&(index, label)| {
            let value = cell(row, index);
            (!value.is_empty()).then(|| format!("{label}: {value}"))
        })
        .collect();

    let notes = cell(row, NOTES);
    if !notes.is_empty() {
        parts.push(notes.to_string());
    }
    parts.push(format!("[Threshold note: {threshold_note}]"));
    parts.join(DETAILS_SEPARATOR)
}
