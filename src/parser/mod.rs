//! Turns free-form, model-generated itinerary text into a [`TripItinerary`].
//!
//! Parsing is total: any input string yields an itinerary with exactly one
//! day per trip date and exactly three activities per day. Whatever the text
//! does not supply is filled in by deterministic fallback content, so the
//! same input always produces the same output.
//!
//! ```
//! use chrono::NaiveDate;
//! use trip_itinerary_rs::{parse_itinerary, TripRequest};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
//! let request = TripRequest::new("Paris", start, end);
//!
//! let itinerary = parse_itinerary("", &request);
//! assert_eq!(itinerary.days.len(), 3);
//! assert!(!itinerary.highlights.is_empty());
//! ```

mod extract;
mod fallback;
mod segment;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{TimeSlot, TripDay, TripItinerary, TripRequest};

/// What the parser managed to take from the text versus what it synthesized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Whether highlight bullets were found in the text
    pub highlights_extracted: bool,
    /// Day numbers (within the trip) that had a heading in the text
    pub days_found: Vec<u32>,
    /// Slots filled from the text
    pub slots_extracted: usize,
    /// Slots filled with fallback content
    pub slots_synthesized: usize,
}

impl ParseReport {
    pub fn days_missing(&self, duration_days: u32) -> Vec<u32> {
        (1..=duration_days)
            .filter(|day| !self.days_found.contains(day))
            .collect()
    }

    pub fn is_fully_extracted(&self) -> bool {
        self.highlights_extracted && self.slots_synthesized == 0
    }
}

/// Parse generated itinerary text for the trip described by `request`.
pub fn parse_itinerary(raw_text: &str, request: &TripRequest) -> TripItinerary {
    parse_itinerary_with_report(raw_text, request).0
}

/// Like [`parse_itinerary`], also reporting which parts came from the text.
pub fn parse_itinerary_with_report(
    raw_text: &str,
    request: &TripRequest,
) -> (TripItinerary, ParseReport) {
    let destination = request.destination.as_str();
    let duration_days = request.duration_days();
    let mut report = ParseReport::default();

    let mut highlights = segment::highlight_bullets(raw_text);
    debug!("Found {} highlights", highlights.len());
    if highlights.is_empty() {
        highlights = fallback::highlights(destination);
    } else {
        report.highlights_extracted = true;
    }

    let spans = segment::day_spans(raw_text);
    let days = (1..=duration_days)
        .map(|day_number| {
            let date = day_date(request.start_date, day_number);

            let Some(day_text) = spans.get(&day_number) else {
                debug!("Could not find match for Day {}", day_number);
                report.slots_synthesized += TimeSlot::ALL.len();
                return TripDay::new(
                    day_number,
                    date,
                    fallback::day_activities(destination, day_number),
                );
            };

            report.days_found.push(day_number);
            let activities = TimeSlot::ALL
                .iter()
                .map(|&slot| match extract::extract_activity(day_text, slot) {
                    Some(activity) => {
                        report.slots_extracted += 1;
                        activity
                    }
                    None => {
                        debug!(
                            "Could not parse {} activity for Day {}, creating fallback",
                            slot, day_number
                        );
                        report.slots_synthesized += 1;
                        fallback::slot_activity(destination, slot, day_number)
                    }
                })
                .collect();

            TripDay::new(day_number, date, activities)
        })
        .collect::<Vec<_>>();

    debug!(
        days = days.len(),
        extracted = report.slots_extracted,
        synthesized = report.slots_synthesized,
        "Parsed itinerary for {}",
        destination
    );

    let itinerary = TripItinerary {
        destination: request.destination.clone(),
        summary: fallback::summary(destination, duration_days),
        highlights,
        date_range: request.date_range(),
        days,
    };

    (itinerary, report)
}

fn day_date(start: NaiveDate, day_number: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(day_number.saturating_sub(1))))
        .unwrap_or(NaiveDate::MAX)
}
