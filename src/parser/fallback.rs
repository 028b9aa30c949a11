//! Deterministic stand-in content for anything the source text did not yield.

use crate::types::{TimeSlot, TripActivity};

pub(crate) fn highlights(destination: &str) -> Vec<String> {
    vec![
        format!("Experience the best of {destination}"),
        "Visit iconic landmarks".to_string(),
        "Enjoy local cuisine".to_string(),
        "Immerse in local culture".to_string(),
        "Create unforgettable memories".to_string(),
    ]
}

pub(crate) fn summary(destination: &str, duration_days: u32) -> String {
    format!("Your {duration_days}-day adventure in {destination}")
}

/// Activity for a slot that was missing or malformed inside a day that was
/// otherwise found. Evening costs half again as much, rounded half up.
pub(crate) fn slot_activity(destination: &str, slot: TimeSlot, day_number: u32) -> TripActivity {
    let base = day_number.saturating_mul(5).saturating_add(30);
    let cost = match slot {
        TimeSlot::Evening => base.saturating_mul(3).saturating_add(1) / 2,
        TimeSlot::Morning | TimeSlot::Afternoon => base,
    };

    TripActivity {
        time_slot: slot,
        name: format!("{destination} {slot} Activity"),
        description: format!(
            "Enjoy {} activities in {destination}",
            slot.label().to_lowercase()
        ),
        category: "Sightseeing".to_string(),
        cost,
    }
}

/// Full schedule for a day with no heading in the source text.
pub(crate) fn day_activities(destination: &str, day_number: u32) -> Vec<TripActivity> {
    let step = day_number.saturating_mul(5);

    TimeSlot::ALL
        .iter()
        .map(|&slot| {
            let (name, description, category, base) = match slot {
                TimeSlot::Morning => (
                    format!("Explore {destination} - Day {day_number} Morning"),
                    format!(
                        "Start your day with a local breakfast and explore nearby attractions in {destination}."
                    ),
                    "Sightseeing",
                    40,
                ),
                TimeSlot::Afternoon => (
                    format!("{destination} Experience - Day {day_number} Afternoon"),
                    format!("Enjoy local cuisine and visit popular landmarks around {destination}."),
                    "Cultural",
                    50,
                ),
                TimeSlot::Evening => (
                    format!("{destination} Night - Day {day_number} Evening"),
                    format!(
                        "Experience the nightlife and local entertainment options of {destination}."
                    ),
                    "Entertainment",
                    70,
                ),
            };

            TripActivity {
                time_slot: slot,
                name,
                description,
                category: category.to_string(),
                cost: step.saturating_add(base),
            }
        })
        .collect()
}
