//! trip-itinerary-rs: structured trip itineraries from generated travel plans
//!
//! A generative model is asked for a day-by-day plan in a loose text
//! template. The text that comes back may follow the template, half-follow
//! it, or ignore it entirely; [`parse_itinerary`] turns whatever it gets into
//! a [`TripItinerary`] with exactly one day per trip date and a Morning,
//! Afternoon and Evening activity for each, filling gaps with deterministic
//! fallback content.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use trip_itinerary_rs::{TripPlanner, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = TripPlanner::from_env()?;
//!     let request = TripRequest::new(
//!         "Paris, France",
//!         NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
//!     )
//!     .with_budget(1500.0)
//!     .with_preferences(["Cultural", "Foodie"]);
//!
//!     let itinerary = planner.plan(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&itinerary)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod planner;
pub mod prompt;
pub mod schemas;
pub mod services;
pub mod types;

pub use config::{ProviderConfig, ProviderKind};
pub use error::{Result, TripError};
pub use parser::{parse_itinerary, parse_itinerary_with_report, ParseReport};
pub use planner::{PlannedTrip, TripPlanner};
pub use prompt::build_itinerary_prompt;
pub use services::{ChatCompletionsClient, GeminiClient, TextProvider};
pub use types::{
    Accommodation, DateRange, TimeSlot, TripActivity, TripDay, TripItinerary, TripRequest,
    Weather, MAX_TRIP_DAYS,
};

#[cfg(feature = "cli")]
pub mod cli;
