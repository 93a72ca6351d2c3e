//! Once-a-day check for a newer release on crates.io.

use std::fs;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use log::debug;
use semver::Version;
use serde::Deserialize;

use crate::error::{Error, Result};

const CRATES_IO_API: &str = "https://crates.io/api/v1/crates/gorilla-cli";
const DATE_FORMAT: &str = "%Y-%m-%d";
const FILE_DESCRIPTION: &str = "update check";

#[derive(Deserialize)]
struct CratesIoResponse {
    #[serde(rename = "crate")]
    crate_info: CrateInfo,
}

#[derive(Deserialize)]
struct CrateInfo {
    newest_version: String,
}

/// Whether a check is due: the stamp is missing, unreadable or older than `today`.
#[must_use]
pub fn check_is_due(stamp_path: &str, today: NaiveDate) -> bool {
    let last_check = fs::read_to_string(stamp_path)
        .ok()
        .and_then(|stamp| NaiveDate::parse_from_str(stamp.trim(), DATE_FORMAT).ok());

    match last_check {
        Some(last_check) => today > last_check,
        None => true,
    }
}

/// Stores `today` as the date of the last check.
///
/// # Errors
///
/// Returns an error if the stamp file cannot be written.
pub fn record_check(stamp_path: &str, today: NaiveDate) -> Result<()> {
    fs::write(stamp_path, today.format(DATE_FORMAT).to_string())
        .map_err(|e| Error::io_error(FILE_DESCRIPTION, stamp_path, e))
}

/// Whether `latest` is a newer semantic version than `current`.
///
/// # Errors
///
/// Returns an error if either version does not parse.
pub fn is_newer(latest: &str, current: &str) -> Result<bool> {
    let parse = |version: &str| {
        Version::parse(version.trim_start_matches('v'))
            .map_err(|e| Error::version_error(version, e))
    };
    Ok(parse(latest)? > parse(current)?)
}

/// Asks crates.io for the newest published version.
///
/// # Errors
///
/// Returns an error if the request fails or the response is not understood.
pub fn fetch_latest_version(current: &str) -> Result<String> {
    let action = "query crates.io";
    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("gorilla-cli/{current}"))
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| Error::http_error("create HTTP client", e))?;

    let response: CratesIoResponse = client
        .get(CRATES_IO_API)
        .send()
        .map_err(|e| Error::http_error(action, e))?
        .json()
        .map_err(|e| Error::http_error(action, e))?;

    Ok(response.crate_info.newest_version)
}

/// Outcome of a daily check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheck {
    /// Checked already today.
    Skipped,
    UpToDate,
    Available { latest: String },
}

/// Runs the check for the running `current` version if one is due, and
/// records that it happened.
///
/// The stamp is written even when the lookup fails, so that an offline user
/// is bothered at most once a day.
///
/// # Errors
///
/// Returns the lookup error, or the stamp write error if the lookup succeeded.
pub fn check_for_updates(stamp_path: &str, current: &str) -> Result<UpdateCheck> {
    let today = Local::now().date_naive();
    if !check_is_due(stamp_path, today) {
        debug!("Update check already done today");
        return Ok(UpdateCheck::Skipped);
    }

    let lookup = fetch_latest_version(current).and_then(|latest| {
        if is_newer(&latest, current)? {
            Ok(UpdateCheck::Available { latest })
        } else {
            Ok(UpdateCheck::UpToDate)
        }
    });
    let stamp = record_check(stamp_path, today);

    let check = lookup?;
    stamp?;
    Ok(check)
}
