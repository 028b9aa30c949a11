use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::trip::DateRange;

/// Structured itinerary handed to the rendering layer.
///
/// Serializes to the JSON shape the trip UI consumes (`dates`, `day`,
/// `time`, `type`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripItinerary {
    /// Destination echoed from the request
    pub destination: String,
    /// One-line templated summary of the trip
    pub summary: String,
    /// Short promotional bullets about the trip, never empty
    #[schemars(length(min = 1))]
    pub highlights: Vec<String>,
    /// Inclusive start and end dates echoed from the request
    #[serde(rename = "dates")]
    pub date_range: DateRange,
    /// One entry per trip day, in order
    #[schemars(length(min = 1))]
    pub days: Vec<TripDay>,
}

impl TripItinerary {
    pub fn day(&self, day_number: u32) -> Option<&TripDay> {
        self.days.iter().find(|day| day.day_number == day_number)
    }

    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|day| day.activities.len()).sum()
    }

    /// Sum of every activity cost across the trip, in USD.
    pub fn total_cost(&self) -> u64 {
        self.days.iter().map(|day| u64::from(day.daily_budget)).sum()
    }
}

/// Scheduled activities for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripDay {
    /// 1-based day counter within the itinerary
    #[serde(rename = "day")]
    #[schemars(range(min = 1))]
    pub day_number: u32,
    /// Calendar date of this day
    pub date: NaiveDate,
    /// Morning, Afternoon and Evening activities in that order
    #[schemars(length(equal = 3))]
    pub activities: Vec<TripActivity>,
    /// Sum of the day's activity costs in USD
    pub daily_budget: u32,
    /// Placeholder forecast
    pub weather: Weather,
}

impl TripDay {
    pub fn new(day_number: u32, date: NaiveDate, activities: Vec<TripActivity>) -> Self {
        let daily_budget = activities
            .iter()
            .fold(0u32, |total, activity| total.saturating_add(activity.cost));
        Self {
            day_number,
            date,
            activities,
            daily_budget,
            weather: Weather::default(),
        }
    }

    pub fn activity(&self, slot: TimeSlot) -> Option<&TripActivity> {
        self.activities
            .iter()
            .find(|activity| activity.time_slot == slot)
    }
}

/// One scheduled activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripActivity {
    #[serde(rename = "time")]
    pub time_slot: TimeSlot,
    #[schemars(length(min = 1))]
    pub name: String,
    #[schemars(length(min = 1))]
    pub description: String,
    /// Display label such as "Sightseeing" or "Food"
    #[serde(rename = "type")]
    pub category: String,
    /// Estimated cost in USD
    pub cost: u32,
}

/// The three fixed parts of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Forecast shown next to each day. Not backed by a weather service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Weather {
    pub condition: String,
    /// Degrees Fahrenheit
    pub temperature: i32,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            condition: "Sunny".to_string(),
            temperature: 75,
        }
    }
}
