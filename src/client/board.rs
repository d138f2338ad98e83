use askama::Template;
use serde::Deserialize;
use serde_json::Number;
use tracing::{info, warn};

use crate::models::ride::{NewRide, Ride};

use super::{ClientError, RidesApi};

pub const CREATED_MESSAGE: &str = "Ride added successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    DriverId,
    FromLabel,
    ToCampus,
    Seats,
    DepartTime,
    Notes,
}

/// Raw text of the create form. Nothing is parsed until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RideForm {
    pub driver_id: String,
    pub from_label: String,
    pub to_campus: String,
    pub seats: String,
    pub depart_time: String,
    pub notes: String,
}

impl RideForm {
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::DriverId => &mut self.driver_id,
            FormField::FromLabel => &mut self.from_label,
            FormField::ToCampus => &mut self.to_campus,
            FormField::Seats => &mut self.seats,
            FormField::DepartTime => &mut self.depart_time,
            FormField::Notes => &mut self.notes,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn to_request(&self) -> NewRide {
        NewRide {
            driver_id: Some(self.driver_id.clone()),
            depart_time: Some(self.depart_time.clone()),
            from_label: Some(self.from_label.clone()),
            to_campus: Some(self.to_campus.clone()),
            seats: coerce_seats(&self.seats),
            notes: Some(self.notes.clone()).filter(|notes| !notes.is_empty()),
        }
    }
}

/// Numeric coercion of the seats text: blank is zero, non-numeric is absent.
pub fn coerce_seats(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Number::from(0i64));
    }
    if let Ok(whole) = raw.parse::<i64>() {
        return Some(Number::from(whole));
    }
    let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Template)]
#[template(path = "rides/page.html")]
pub struct RidesPageTemplate {
    loading: bool,
    form: RideForm,
    rides: Vec<Ride>,
    has_notification: bool,
    notification_class: &'static str,
    notification_message: String,
}

/// The ride board: fetches the list once on mount and merges created rides
/// into it locally.
pub struct RideBoard<A> {
    api: A,
    load_state: LoadState,
    rides: Vec<Ride>,
    form: RideForm,
    notification: Option<Notification>,
}

impl<A: RidesApi> RideBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            load_state: LoadState::Loading,
            rides: Vec::new(),
            form: RideForm::default(),
            notification: None,
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn form(&self) -> &RideForm {
        &self.form
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub async fn mount(&mut self) {
        if self.load_state == LoadState::Loaded {
            return;
        }
        match self.api.list_rides().await {
            Ok(rides) => self.rides = rides,
            Err(err) => warn!("error fetching rides: {err}"),
        }
        self.load_state = LoadState::Loaded;
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value.into());
    }

    pub fn replace_form(&mut self, form: RideForm) {
        self.form = form;
    }

    /// Sends the form. On success the returned ride goes to the front of the
    /// list and the form is cleared; on failure form and list stay as they were.
    pub async fn submit(&mut self) -> Result<&Ride, ClientError> {
        let request = self.form.to_request();
        match self.api.create_ride(&request).await {
            Ok(ride) => {
                info!(ride_id = %ride.id, "ride added to board");
                self.notification = Some(Notification {
                    kind: NotificationKind::Success,
                    message: CREATED_MESSAGE.to_string(),
                });
                self.rides.insert(0, ride);
                self.form = RideForm::default();
                Ok(&self.rides[0])
            }
            Err(err) => {
                self.notification = Some(Notification {
                    kind: NotificationKind::Failure,
                    message: format!("Error creating ride: {err}"),
                });
                Err(err)
            }
        }
    }

    pub fn page(&self) -> RidesPageTemplate {
        let (notification_class, notification_message) = match &self.notification {
            Some(n) if n.kind == NotificationKind::Success => ("success", n.message.clone()),
            Some(n) => ("failure", n.message.clone()),
            None => ("", String::new()),
        };
        RidesPageTemplate {
            loading: self.load_state == LoadState::Loading,
            form: self.form.clone(),
            rides: self.rides.clone(),
            has_notification: self.notification.is_some(),
            notification_class,
            notification_message,
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        self.page().render()
    }
}
