use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        driver::Driver,
        ride::{Ride, RideDraft, RideWithDriver},
    },
};

/// Persistence for rides and the drivers they reference.
///
/// Timestamps are written as fixed-width RFC 3339 UTC text with millisecond
/// precision, so ordering by the text column is chronological.
#[derive(Clone)]
pub struct RideStore {
    db: DbPool,
}

impl RideStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn create(&self, draft: RideDraft) -> Result<Ride, AppError> {
        let ride = Ride {
            id: Uuid::new_v4().to_string(),
            driver_id: draft.driver_id,
            depart_time: draft.depart_time,
            from_label: draft.from_label,
            to_campus: draft.to_campus,
            seats: draft.seats,
            notes: draft.notes,
        };

        sqlx::query(
            r#"INSERT INTO rides (id, driver_id, depart_time, from_label, to_campus, seats, notes)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&ride.id)
        .bind(&ride.driver_id)
        .bind(encode_timestamp(ride.depart_time))
        .bind(&ride.from_label)
        .bind(&ride.to_campus)
        .bind(ride.seats)
        .bind(&ride.notes)
        .execute(&self.db)
        .await?;

        Ok(ride)
    }

    pub async fn list(&self) -> Result<Vec<RideWithDriver>, AppError> {
        let rows = sqlx::query(
            r#"SELECT r.id, r.driver_id, r.depart_time, r.from_label, r.to_campus, r.seats, r.notes,
                      d.name AS driver_name, d.email AS driver_email, d.created_at AS driver_created_at
               FROM rides r
               JOIN drivers d ON d.id = r.driver_id
               ORDER BY r.depart_time ASC, r.rowid ASC"#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.iter().map(ride_with_driver_from_row).collect()
    }

    pub async fn create_driver(&self, driver: Driver) -> Result<Driver, AppError> {
        sqlx::query("INSERT INTO drivers (id, name, email, created_at) VALUES (?, ?, ?, ?)")
            .bind(&driver.id)
            .bind(&driver.name)
            .bind(&driver.email)
            .bind(encode_timestamp(driver.created_at))
            .execute(&self.db)
            .await?;
        Ok(driver)
    }
}

fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn ride_with_driver_from_row(row: &SqliteRow) -> Result<RideWithDriver, AppError> {
    let driver_id: String = row.try_get("driver_id")?;
    let ride = Ride {
        id: row.try_get("id")?,
        driver_id: driver_id.clone(),
        depart_time: row.try_get("depart_time")?,
        from_label: row.try_get("from_label")?,
        to_campus: row.try_get("to_campus")?,
        seats: row.try_get("seats")?,
        notes: row.try_get("notes")?,
    };
    let driver = Driver {
        id: driver_id,
        name: row.try_get("driver_name")?,
        email: row.try_get("driver_email")?,
        created_at: row.try_get("driver_created_at")?,
    };
    Ok(RideWithDriver { ride, driver })
}
