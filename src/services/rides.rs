use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde_json::Number;
use tracing::{debug, error, info};

use crate::{
    error::AppError,
    models::ride::{NewRide, Ride, RideDraft, RideWithDriver},
};

use super::ride_store::RideStore;

const ZONED_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Clone)]
pub struct RideService {
    store: RideStore,
}

impl RideService {
    pub fn new(store: RideStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RideStore {
        &self.store
    }

    pub async fn create(&self, input: NewRide) -> Result<Ride, AppError> {
        let draft = validate(input)?;
        match self.store.create(draft).await {
            Ok(ride) => {
                info!(ride_id = %ride.id, driver_id = %ride.driver_id, "ride created");
                Ok(ride)
            }
            Err(err) => {
                error!("failed to create ride: {err}");
                Err(err)
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<RideWithDriver>, AppError> {
        self.store.list().await.inspect_err(|err| {
            error!("failed to list rides: {err}");
        })
    }
}

/// Applies the presence check and converts the raw request into a store draft.
///
/// Presence is truthiness: empty strings and `seats == 0` count as missing.
pub fn validate(input: NewRide) -> Result<RideDraft, AppError> {
    let NewRide {
        driver_id,
        depart_time,
        from_label,
        to_campus,
        seats,
        notes,
    } = input;

    let (Some(driver_id), Some(depart_time), Some(from_label), Some(to_campus), Some(seats)) = (
        present(driver_id),
        present(depart_time),
        present(from_label),
        present(to_campus),
        seats.filter(is_nonzero),
    ) else {
        debug!("rejecting ride with missing required fields");
        return Err(AppError::MissingFields);
    };

    let seats = whole_seats(&seats).ok_or_else(|| AppError::InvalidSeats(seats.to_string()))?;

    Ok(RideDraft {
        driver_id,
        depart_time: parse_depart_time(&depart_time)?,
        from_label,
        to_campus,
        seats,
        notes,
    })
}

/// Parses an ISO-like timestamp. Values without an offset are read as UTC.
///
/// Only years 0000 through 9999 are accepted, so the stored text stays fixed width.
pub fn parse_depart_time(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    parse_iso_like(raw)
        .map(|dt| dt.trunc_subsecs(3))
        .filter(|dt| (0..=9999).contains(&dt.year()))
        .ok_or_else(|| AppError::InvalidDepartTime(raw.to_string()))
}

fn parse_iso_like(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let zoned = match raw.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(local) => format!("{local}+00:00"),
        None => raw.to_string(),
    };
    for format in ZONED_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_nonzero(value: &Number) -> bool {
    value.as_f64().is_some_and(|v| v != 0.0)
}

/// Integral JSON numbers such as `2.0` or `2e0` count as whole seats.
fn whole_seats(value: &Number) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
            .map(|v| v as i64)
    })
}
