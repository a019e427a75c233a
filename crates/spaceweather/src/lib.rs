//! Daily space-weather indices from CelesTrak's `SW-All.csv`.
//!
//! Empirical thermosphere models need the 10.7 cm solar flux and the
//! planetary equivalent amplitude (Ap) for the epoch being evaluated. This
//! crate loads the CelesTrak table, drops rows past the last fully observed
//! day, and answers per-timestamp lookups.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Last date for which the bundled CelesTrak export carries every needed column.
pub fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 6, 3).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Error)]
pub enum SpaceWeatherError {
    #[error("failed to read space-weather file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse space-weather CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid date '{0}' in space-weather table")]
    InvalidDate(String),
    #[error("no space-weather data for {0}")]
    MissingDate(NaiveDate),
    #[error("{date} lies past the space-weather cutoff {cutoff}")]
    PastCutoff { date: NaiveDate, cutoff: NaiveDate },
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "AP1")]
    ap1: Option<f64>,
    #[serde(rename = "AP2")]
    ap2: Option<f64>,
    #[serde(rename = "AP3")]
    ap3: Option<f64>,
    #[serde(rename = "AP4")]
    ap4: Option<f64>,
    #[serde(rename = "AP5")]
    ap5: Option<f64>,
    #[serde(rename = "AP6")]
    ap6: Option<f64>,
    #[serde(rename = "AP7")]
    ap7: Option<f64>,
    #[serde(rename = "AP8")]
    ap8: Option<f64>,
    #[serde(rename = "F10.7_OBS")]
    f107_obs: Option<f64>,
    #[serde(rename = "F10.7_OBS_LAST81")]
    f107_obs_last81: Option<f64>,
}

/// One day of observed indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceWeatherDay {
    pub date: NaiveDate,
    /// Ap for the eight 3-hour intervals starting at 00, 03, …, 21 UT.
    pub ap: [f64; 8],
    pub f107_obs: f64,
    pub f107_obs_last81: f64,
}

impl SpaceWeatherDay {
    /// Ap for the 3-hour interval containing `at`.
    pub fn ap_at(&self, at: &NaiveDateTime) -> f64 {
        self.ap[ap_slot(at)]
    }
}

/// Index of the 3-hour Ap interval (0..8) containing `at`.
pub fn ap_slot(at: &NaiveDateTime) -> usize {
    (at.hour() / 3).min(7) as usize
}

/// Inputs an empirical density model needs for one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceWeatherIndices {
    pub f107: f64,
    pub f107_avg: f64,
    pub ap: f64,
}

/// Observed space weather keyed by UTC date.
#[derive(Debug, Clone)]
pub struct SpaceWeatherTable {
    days: BTreeMap<NaiveDate, SpaceWeatherDay>,
    cutoff: NaiveDate,
}

impl SpaceWeatherTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SpaceWeatherError> {
        Self::from_reader(File::open(path)?, default_cutoff())
    }

    /// Parse a CelesTrak-format CSV, keeping complete rows dated on or before `cutoff`.
    pub fn from_reader<R: Read>(reader: R, cutoff: NaiveDate) -> Result<Self, SpaceWeatherError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut days = BTreeMap::new();
        for row in csv_reader.deserialize::<RawRow>() {
            let row = row?;
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
                .map_err(|_| SpaceWeatherError::InvalidDate(row.date.clone()))?;
            if date > cutoff {
                continue;
            }
            if let Some(day) = complete_day(date, &row) {
                days.insert(date, day);
            }
        }
        debug!(days = days.len(), %cutoff, "loaded space-weather table");
        Ok(Self { days, cutoff })
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, date: NaiveDate) -> Result<&SpaceWeatherDay, SpaceWeatherError> {
        if date > self.cutoff {
            return Err(SpaceWeatherError::PastCutoff {
                date,
                cutoff: self.cutoff,
            });
        }
        self.days
            .get(&date)
            .ok_or(SpaceWeatherError::MissingDate(date))
    }

    /// Ap for the 3-hour interval containing `at`.
    pub fn ap_for(&self, at: &NaiveDateTime) -> Result<f64, SpaceWeatherError> {
        Ok(self.day(at.date())?.ap_at(at))
    }

    pub fn indices_for(&self, at: &NaiveDateTime) -> Result<SpaceWeatherIndices, SpaceWeatherError> {
        let day = self.day(at.date())?;
        Ok(SpaceWeatherIndices {
            f107: day.f107_obs,
            f107_avg: day.f107_obs_last81,
            ap: day.ap_at(at),
        })
    }
}

fn complete_day(date: NaiveDate, row: &RawRow) -> Option<SpaceWeatherDay> {
    Some(SpaceWeatherDay {
        date,
        ap: [
            row.ap1?, row.ap2?, row.ap3?, row.ap4?, row.ap5?, row.ap6?, row.ap7?, row.ap8?,
        ],
        f107_obs: row.f107_obs?,
        f107_obs_last81: row.f107_obs_last81?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn ap_slots_follow_three_hour_intervals() {
        assert_eq!(ap_slot(&at(0, 0)), 0);
        assert_eq!(ap_slot(&at(2, 59)), 0);
        assert_eq!(ap_slot(&at(3, 0)), 1);
        assert_eq!(ap_slot(&at(12, 30)), 4);
        assert_eq!(ap_slot(&at(21, 30)), 7);
        assert_eq!(ap_slot(&at(23, 59)), 7);
    }
}
