//! The directory roster used by `seed-directory`.
//!
//! The built-in roster is placeholder content for a fresh project. Real
//! deployments pass `--roster path.json` with a JSON array of lawyers.

use std::path::Path;

use backend::records::{Lawyer, LawyerStatus};

use crate::error::CliError;

struct Entry {
    id: i64,
    name: &'static str,
    title: &'static str,
    areas: &'static [&'static str],
    years: i32,
    code: &'static str,
    status: LawyerStatus,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1,
        name: "Avery Holt",
        title: "Managing Partner",
        areas: &["Corporate Law", "Mergers & Acquisitions"],
        years: 24,
        code: "HOLT01",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 2,
        name: "Morgan Reyes",
        title: "Senior Partner",
        areas: &["Family Law", "Divorce", "Child Custody"],
        years: 19,
        code: "REYES02",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 3,
        name: "Priya Natarajan",
        title: "Partner",
        areas: &["Immigration Law"],
        years: 14,
        code: "NATA03",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 4,
        name: "Daniel Okafor",
        title: "Partner",
        areas: &["Criminal Defense", "Traffic Violations"],
        years: 16,
        code: "OKAF04",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 5,
        name: "Elena Varga",
        title: "Senior Associate",
        areas: &["Real Estate", "Property Disputes"],
        years: 9,
        code: "VARGA05",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 6,
        name: "Samuel Brandt",
        title: "Senior Associate",
        areas: &["Personal Injury", "Insurance Claims"],
        years: 11,
        code: "BRANDT06",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 7,
        name: "Grace Liu",
        title: "Associate",
        areas: &["Employment Law"],
        years: 6,
        code: "LIU07",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 8,
        name: "Tomas Ferreira",
        title: "Associate",
        areas: &["Estate Planning", "Wills & Trusts"],
        years: 5,
        code: "FERR08",
        status: LawyerStatus::Active,
    },
    Entry {
        id: 9,
        name: "Hannah Weiss",
        title: "Of Counsel",
        areas: &["Intellectual Property"],
        years: 28,
        code: "WEISS09",
        status: LawyerStatus::Inactive,
    },
];

fn email_for(name: &str) -> String {
    let slug: String = name
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(".");
    format!("{slug}@firm.example")
}

/// The built-in roster, ordered by id.
#[must_use]
pub fn default_roster() -> Vec<Lawyer> {
    ENTRIES
        .iter()
        .map(|e| Lawyer {
            id: e.id,
            name: e.name.to_owned(),
            email: email_for(e.name),
            phone: format!("+1-555-010-{:04}", e.id),
            title: e.title.to_owned(),
            practice_areas: e.areas.iter().map(|a| (*a).to_owned()).collect(),
            bio: format!("{} practices {} with {} years of experience.", e.name, e.areas.join(", "), e.years),
            years_experience: e.years,
            status: e.status,
            image_url: None,
            referral_code: e.code.to_owned(),
        })
        .collect()
}

/// Parse a roster from a JSON array of lawyers.
///
/// # Errors
///
/// Returns [`CliError::InvalidJson`] for malformed input.
pub fn parse_roster(json: &str) -> Result<Vec<Lawyer>, CliError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a roster file.
///
/// # Errors
///
/// Returns [`CliError::ReadFile`] when the file cannot be read, or
/// [`CliError::InvalidJson`] when it does not parse.
pub fn load_roster(path: &Path) -> Result<Vec<Lawyer>, CliError> {
    let json = std::fs::read_to_string(path)
        .map_err(|source| CliError::ReadFile { path: path.display().to_string(), source })?;
    parse_roster(&json)
}

#[cfg(test)]
#[path = "roster_test.rs"]
mod tests;
