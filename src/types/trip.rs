use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::{Result, TripError};

/// Longest trip, in days, that [`TripRequest::validate`] accepts.
pub const MAX_TRIP_DAYS: u32 = 365;

/// Trip details entered by the traveller. Drives both the provider prompt
/// and the day count the parser has to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Destination city and country (e.g., "Paris, France")
    pub destination: String,
    /// First day of the trip
    pub start_date: NaiveDate,
    /// Last day of the trip, inclusive
    pub end_date: NaiveDate,
    /// Budget per person in USD
    #[serde(rename = "budget", default)]
    pub budget_per_person: f64,
    /// Free-form group size ("1", "3-5", "10+")
    #[serde(default = "default_group_size")]
    pub group_size: String,
    /// Free-text preference tags ("Adventure", "Foodie", ...)
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Preferred lodging category
    #[serde(default)]
    pub accommodation: Accommodation,
    /// Additional notes for the planner
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_group_size() -> String {
    "1".to_string()
}

impl TripRequest {
    pub fn new(destination: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            destination: destination.into(),
            start_date,
            end_date,
            budget_per_person: 0.0,
            group_size: default_group_size(),
            preferences: Vec::new(),
            accommodation: Accommodation::default(),
            notes: None,
        }
    }

    pub fn with_budget(mut self, budget_per_person: f64) -> Self {
        self.budget_per_person = budget_per_person;
        self
    }

    pub fn with_group_size(mut self, group_size: impl Into<String>) -> Self {
        self.group_size = group_size.into();
        self
    }

    pub fn with_preferences<I, S>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accommodation(mut self, accommodation: Accommodation) -> Self {
        self.accommodation = accommodation;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Number of itinerary days, counting both endpoints. Never less than 1;
    /// an inverted range is clamped here and rejected by [`TripRequest::validate`].
    pub fn duration_days(&self) -> u32 {
        let delta = (self.end_date - self.start_date).num_days();
        u32::try_from(delta.saturating_add(1)).unwrap_or(0).max(1)
    }

    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Reject requests the parser cannot meaningfully serve.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(TripError::InvalidRequest(
                "destination is required".to_string(),
            ));
        }

        if self.end_date < self.start_date {
            return Err(TripError::InvalidRequest(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        let span = (self.end_date - self.start_date).num_days().saturating_add(1);
        if span > i64::from(MAX_TRIP_DAYS) {
            return Err(TripError::InvalidRequest(format!(
                "trip spans {} days, at most {} are supported",
                span, MAX_TRIP_DAYS
            )));
        }

        if !self.budget_per_person.is_finite() || self.budget_per_person < 0.0 {
            return Err(TripError::InvalidRequest(format!(
                "budget must be a non-negative amount, got {}",
                self.budget_per_person
            )));
        }

        Ok(())
    }
}

/// Inclusive calendar range of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Lodging categories offered by the trip form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Accommodation {
    #[default]
    Hotel,
    Hostel,
    Apartment,
    Resort,
    Camping,
}

impl Accommodation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accommodation::Hotel => "hotel",
            Accommodation::Hostel => "hostel",
            Accommodation::Apartment => "apartment",
            Accommodation::Resort => "resort",
            Accommodation::Camping => "camping",
        }
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accommodation {
    type Err = TripError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hotel" => Ok(Accommodation::Hotel),
            "hostel" => Ok(Accommodation::Hostel),
            "apartment" | "rental" | "vacation rental" => Ok(Accommodation::Apartment),
            "resort" => Ok(Accommodation::Resort),
            "camping" => Ok(Accommodation::Camping),
            other => Err(TripError::InvalidRequest(format!(
                "unknown accommodation `{}` (expected hotel, hostel, apartment, resort or camping)",
                other
            ))),
        }
    }
}
