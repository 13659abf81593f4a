//! Turns raw CSV ride data into a normalized [`Dataset`].
//!
//! Header names are canonicalized, the input is capped to the first
//! `row_cap` rows, and start/end coordinates are optionally backfilled from
//! the single recorded location.

use crate::error::{DashboardError, Result};
use crate::record::{Dataset, RideRecord, RiderType};
use crate::source::open_source;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rows kept from the top of the source.
pub const DEFAULT_ROW_CAP: usize = 100;

/// Columns that must be present after header normalization.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "latitude",
    "longitude",
    "station_name",
    "day_of_week",
    "hour_of_day",
    "ride_length",
    "member_casual",
];

/// What to do when explicit start/end coordinate columns are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateBackfill {
    /// Copy `latitude`/`longitude` into the missing start or end pair.
    #[default]
    FromLocation,
    /// Leave the missing pair empty.
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub row_cap: usize,
    pub backfill: CoordinateBackfill,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            row_cap: DEFAULT_ROW_CAP,
            backfill: CoordinateBackfill::default(),
        }
    }
}

/// Why a source row was left out of the dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowIssue {
    #[error("unrecognized rider type `{0}`")]
    UnknownRiderType(String),
    #[error("hour of day `{0}` is not an integer in 0-23")]
    InvalidHour(String),
    #[error("missing day of week")]
    MissingDay,
    #[error("row is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub issue: RowIssue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    pub rows_read: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Trims, lowercases and replaces spaces with underscores.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Where a start or end coordinate pair comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PairSource {
    Columns(usize, usize),
    Location,
    Absent,
}

impl PairSource {
    fn resolve(
        names: &[String],
        lat: &str,
        lng: &str,
        backfill: CoordinateBackfill,
    ) -> PairSource {
        match (position(names, lat), position(names, lng)) {
            (Some(lat_idx), Some(lng_idx)) => PairSource::Columns(lat_idx, lng_idx),
            _ => match backfill {
                CoordinateBackfill::FromLocation => {
                    info!(lat, lng, "Backfilling coordinates from latitude/longitude");
                    PairSource::Location
                }
                CoordinateBackfill::Disabled => PairSource::Absent,
            },
        }
    }

    fn read(
        &self,
        row: &StringRecord,
        location: (Option<f64>, Option<f64>),
    ) -> (Option<f64>, Option<f64>) {
        match *self {
            PairSource::Columns(lat, lng) => (number(row, lat), number(row, lng)),
            PairSource::Location => location,
            PairSource::Absent => (None, None),
        }
    }
}

#[derive(Debug)]
struct Columns {
    latitude: usize,
    longitude: usize,
    station_name: usize,
    day_of_week: usize,
    hour_of_day: usize,
    ride_length: usize,
    member_casual: usize,
    start: PairSource,
    end: PairSource,
}

fn position(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|n| n == name)
}

impl Columns {
    fn resolve(headers: &StringRecord, backfill: CoordinateBackfill) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        debug!(?names, "Normalized ride data headers");

        let require = |name: &str| {
            position(&names, name).ok_or_else(|| DashboardError::MissingField(name.to_string()))
        };

        Ok(Columns {
            latitude: require("latitude")?,
            longitude: require("longitude")?,
            station_name: require("station_name")?,
            day_of_week: require("day_of_week")?,
            hour_of_day: require("hour_of_day")?,
            ride_length: require("ride_length")?,
            member_casual: require("member_casual")?,
            start: PairSource::resolve(&names, "start_lat", "start_lng", backfill),
            end: PairSource::resolve(&names, "end_lat", "end_lng", backfill),
        })
    }

    fn parse_row(&self, row: &StringRecord) -> std::result::Result<RideRecord, RowIssue> {
        let rider_raw = cell(row, self.member_casual).unwrap_or("");
        let rider_type = rider_raw
            .parse::<RiderType>()
            .map_err(|_| RowIssue::UnknownRiderType(rider_raw.to_string()))?;

        let hour_raw = cell(row, self.hour_of_day).unwrap_or("");
        let hour_of_day =
            parse_hour(hour_raw).ok_or_else(|| RowIssue::InvalidHour(hour_raw.to_string()))?;

        let day_of_week = cell(row, self.day_of_week)
            .ok_or(RowIssue::MissingDay)?
            .to_string();

        let latitude = number(row, self.latitude);
        let longitude = number(row, self.longitude);
        let (start_lat, start_lng) = self.start.read(row, (latitude, longitude));
        let (end_lat, end_lng) = self.end.read(row, (latitude, longitude));

        Ok(RideRecord {
            rider_type,
            day_of_week,
            hour_of_day,
            ride_length: cell(row, self.ride_length).and_then(parse_ride_length),
            latitude,
            longitude,
            start_lat,
            start_lng,
            end_lat,
            end_lng,
            station_name: cell(row, self.station_name).map(str::to_string),
        })
    }
}

/// Trimmed, non-empty cell content.
fn cell(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn number(row: &StringRecord, idx: usize) -> Option<f64> {
    cell(row, idx).and_then(parse_number)
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accepts `8` as well as `8.0`.
fn parse_hour(s: &str) -> Option<u8> {
    let hour = match s.trim().parse::<u8>() {
        Ok(h) => h,
        Err(_) => {
            let v = parse_number(s.trim())?;
            if v.fract() != 0.0 || !(0.0..=23.0).contains(&v) {
                return None;
            }
            v as u8
        }
    };
    (hour <= 23).then_some(hour)
}

/// Decimal minutes, or an `H:MM:SS` duration converted to minutes.
fn parse_ride_length(s: &str) -> Option<f64> {
    if let Some(minutes) = parse_number(s) {
        return Some(minutes);
    }

    let mut parts = s.split(':');
    let (h, m, sec) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let hours = h.trim().parse::<u64>().ok()?;
    let mins = m.trim().parse::<u64>().ok().filter(|m| *m < 60)?;
    let secs = parse_number(sec.trim()).filter(|s| (0.0..60.0).contains(s))?;

    let whole_minutes = hours.checked_mul(60)?.checked_add(mins)?;

    Some(whole_minutes as f64 + secs / 60.0)
}

/// Normalizes CSV ride data read from `reader`.
///
/// # Errors
///
/// Returns [`DashboardError::MissingField`] if a required column is absent,
/// or a CSV error if the data cannot be read at all. Rows that are not valid
/// UTF-8 or have an unknown rider type, an invalid hour or no day label are
/// skipped and listed in the returned [`NormalizeReport`].
#[tracing::instrument(skip_all, fields(row_cap = options.row_cap, backfill = ?options.backfill))]
pub fn normalize_reader<R: Read>(
    reader: R,
    options: &NormalizeOptions,
) -> Result<(Dataset, NormalizeReport)> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::resolve(&headers, options.backfill)?;

    let mut records = Vec::new();
    let mut report = NormalizeReport::default();

    for (index, result) in rdr.byte_records().take(options.row_cap).enumerate() {
        let row = result?;
        report.rows_read += 1;

        let parsed = StringRecord::from_byte_record(row)
            .map_err(|_| RowIssue::InvalidUtf8)
            .and_then(|row| columns.parse_row(&row));

        match parsed {
            Ok(record) => records.push(record),
            Err(issue) => {
                warn!(row = index + 1, %issue, "Skipping malformed ride row");
                report.skipped.push(SkippedRow {
                    row: index + 1,
                    issue,
                });
            }
        }
    }

    info!(
        rows_read = report.rows_read,
        kept = records.len(),
        skipped = report.skipped.len(),
        "Ride data normalized"
    );

    Ok((Dataset::new(records), report))
}

/// Opens `path` (plain or `.gz`) and normalizes it.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_path(path: &Path, options: &NormalizeOptions) -> Result<(Dataset, NormalizeReport)> {
    normalize_reader(open_source(path)?, options)
}
