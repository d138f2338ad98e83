use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::{driver::Driver, iso_millis};

/// A posted carpool offer as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: String,
    pub driver_id: String,
    #[serde(with = "iso_millis")]
    pub depart_time: DateTime<Utc>,
    pub from_label: String,
    pub to_campus: String,
    pub seats: i64,
    pub notes: Option<String>,
}

impl Ride {
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|notes| !notes.is_empty())
    }

    pub fn notes_display(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    pub fn depart_display(&self) -> String {
        self.depart_time.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// A ride as listed, with its driver record embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideWithDriver {
    #[serde(flatten)]
    pub ride: Ride,
    pub driver: Driver,
}

/// Create request body. Every field is optional on the wire so that presence
/// checks happen in the service rather than in the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRide {
    pub driver_id: Option<String>,
    pub depart_time: Option<String>,
    pub from_label: Option<String>,
    pub to_campus: Option<String>,
    pub seats: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Validated input handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideDraft {
    pub driver_id: String,
    pub depart_time: DateTime<Utc>,
    pub from_label: String,
    pub to_campus: String,
    pub seats: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRide {
    pub success: bool,
    pub ride: Ride,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn sample() -> Ride {
        Ride {
            id: "r1".into(),
            driver_id: "d1".into(),
            depart_time: Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap(),
            from_label: "Coquitlam".into(),
            to_campus: "Burnaby".into(),
            seats: 3,
            notes: None,
        }
    }

    #[test]
    fn ride_serializes_with_camel_case_and_millis() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "r1",
                "driverId": "d1",
                "departTime": "2025-09-01T08:00:00.000Z",
                "fromLabel": "Coquitlam",
                "toCampus": "Burnaby",
                "seats": 3,
                "notes": null,
            })
        );
    }

    #[test]
    fn listed_ride_embeds_driver_next_to_ride_fields() {
        let driver = Driver {
            id: "d1".into(),
            name: "Sam".into(),
            email: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        };
        let value = serde_json::to_value(RideWithDriver {
            ride: sample(),
            driver,
        })
        .unwrap();
        assert_eq!(value["fromLabel"], "Coquitlam");
        assert_eq!(value["driver"]["name"], "Sam");
        assert_eq!(value["driver"]["createdAt"], "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn client_ride_ignores_embedded_driver() {
        let ride: Ride = serde_json::from_value(json!({
            "id": "r1",
            "driverId": "d1",
            "departTime": "2025-09-01T08:00:00.000Z",
            "fromLabel": "Coquitlam",
            "toCampus": "Burnaby",
            "seats": 3,
            "notes": null,
            "driver": { "id": "d1", "name": "Sam" },
        }))
        .unwrap();
        assert_eq!(ride, sample());
    }

    #[test]
    fn empty_notes_are_not_displayed() {
        let mut ride = sample();
        ride.notes = Some(String::new());
        assert!(!ride.has_notes());
        ride.notes = Some("bring snacks".into());
        assert!(ride.has_notes());
        assert_eq!(ride.notes_display(), "bring snacks");
    }
}
