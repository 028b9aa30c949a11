use chrono::{Days, NaiveDate};

use crate::types::TripRequest;

/// Render a date the way the prompt presents it, e.g. "Monday, June 2".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

/// Display labels for every day of the trip, in order.
pub fn trip_dates(request: &TripRequest) -> Vec<String> {
    (0..request.duration_days())
        .filter_map(|offset| {
            request
                .start_date
                .checked_add_days(Days::new(u64::from(offset)))
        })
        .map(format_display_date)
        .collect()
}

/// Build the itinerary prompt sent to the generative provider.
///
/// The output template it asks for (`Trip Highlights:` bullets, then
/// `Day N` blocks of `Slot: Title – Description – $amount – Category` lines)
/// is what [`crate::parse_itinerary`] looks for, though the parser does not
/// rely on the provider following it.
pub fn build_itinerary_prompt(request: &TripRequest) -> String {
    let preferences = if request.preferences.is_empty() {
        "No specific preferences".to_string()
    } else {
        request.preferences.join(", ")
    };

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .unwrap_or("None provided");

    let day_blocks: Vec<String> = trip_dates(request)
        .iter()
        .enumerate()
        .map(|(index, date)| {
            format!(
                "Day {} – {}\nMorning: [Title] – [Brief description] – [$amount] – [Category: e.g., Sightseeing]\nAfternoon: [Title] – [Brief description] – [$amount] – [Category]\nEvening: [Title] – [Brief description] – [$amount] – [Category]\n",
                index + 1,
                date
            )
        })
        .collect();

    format!(
        "You are a travel planning expert. Generate a personalized day-by-day itinerary with activities for Morning, Afternoon, and Evening. Customize based on the given details.\n\n\
Respond ONLY with the formatted itinerary.\n\n\
---\n\n\
Destination: {destination}\n\
Start Date: {start}\n\
End Date: {end}\n\
Total Budget (per person): ${budget}\n\
Group Size: {group_size}\n\
Accommodation: {accommodation}\n\
Preferences: {preferences}\n\
Additional Notes: {notes}\n\n\
---\n\n\
Format the output like this:\n\n\
Trip Highlights:\n\
- [5 short bullet points about the overall trip experience]\n\n\
Generated Itinerary:\n\n\
{days}\n\
Ensure all activities align with the preferences and budget provided. Balance between tourist attractions and authentic local experiences.\n",
        destination = request.destination,
        start = format_display_date(request.start_date),
        end = format_display_date(request.end_date),
        budget = request.budget_per_person,
        group_size = request.group_size,
        accommodation = request.accommodation,
        preferences = preferences,
        notes = notes,
        days = day_blocks.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Accommodation;

    fn paris() -> TripRequest {
        TripRequest::new(
            "Paris, France",
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
        )
        .with_budget(1500.0)
        .with_group_size("2")
        .with_preferences(["Cultural", "Foodie"])
        .with_accommodation(Accommodation::Hotel)
    }

    #[test]
    fn test_format_display_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(format_display_date(date), "Monday, June 2");
    }

    #[test]
    fn test_prompt_contains_trip_details() {
        let prompt = build_itinerary_prompt(&paris());

        assert!(prompt.contains("Destination: Paris, France"));
        assert!(prompt.contains("Start Date: Monday, June 2"));
        assert!(prompt.contains("End Date: Wednesday, June 4"));
        assert!(prompt.contains("Total Budget (per person): $1500"));
        assert!(prompt.contains("Accommodation: hotel"));
        assert!(prompt.contains("Preferences: Cultural, Foodie"));
        assert!(prompt.contains("Additional Notes: None provided"));
        assert!(prompt.contains("Trip Highlights:"));
    }

    #[test]
    fn test_prompt_has_one_block_per_day() {
        let prompt = build_itinerary_prompt(&paris());

        assert!(prompt.contains("Day 1 – Monday, June 2"));
        assert!(prompt.contains("Day 3 – Wednesday, June 4"));
        assert!(!prompt.contains("Day 4"));
        assert_eq!(prompt.matches("Morning: [Title]").count(), 3);
    }

    #[test]
    fn test_prompt_notes_and_empty_preferences() {
        let request = TripRequest::new(
            "Reykjavik",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .with_notes("Northern lights please");
        let prompt = build_itinerary_prompt(&request);

        assert!(prompt.contains("Additional Notes: Northern lights please"));
        assert!(prompt.contains("Preferences: No specific preferences"));
        assert_eq!(trip_dates(&request).len(), 1);
    }
}
