use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::{
    error::{Result, TripError},
    types::{TimeSlot, TripItinerary},
};

use super::schema::itinerary_schema;

const MAX_SCHEMA_ERRORS: usize = 3;

/// Check a JSON itinerary document against the schema, deserialize it and
/// verify the structural invariants every parsed itinerary upholds.
pub fn validate_itinerary_value(payload: &Value) -> Result<TripItinerary> {
    validate_against_schema(payload)?;

    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let itinerary: TripItinerary =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            let path = err.path().to_string();
            let location = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            TripError::Validation(format!(
                "failed to deserialize itinerary at {}: {}",
                location,
                err.inner()
            ))
        })?;

    check_invariants(&itinerary)?;
    Ok(itinerary)
}

/// Parse and validate an itinerary JSON document.
pub fn validate_itinerary_str(document: &str) -> Result<TripItinerary> {
    let value: Value = serde_json::from_str(document)?;
    validate_itinerary_value(&value)
}

fn validate_against_schema(payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(itinerary_schema())
        .map_err(|err| {
            TripError::Validation(format!("Failed to prepare itinerary schema: {}", err))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "itinerary failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        return Err(TripError::Validation(format!(
            "Itinerary does not match schema: {}",
            detail_str
        )));
    }

    Ok(())
}

/// Invariants the schema cannot express: day count and dates follow the
/// date range, slots come in order, budgets add up.
pub fn check_invariants(itinerary: &TripItinerary) -> Result<()> {
    if itinerary.highlights.is_empty() {
        return Err(TripError::Validation("highlights must not be empty".into()));
    }

    let range = itinerary.date_range;
    let expected_days = (range.end - range.start).num_days().saturating_add(1).max(1);
    if itinerary.days.len() as i64 != expected_days {
        return Err(TripError::Validation(format!(
            "expected {} days for {} to {}, found {}",
            expected_days,
            range.start,
            range.end,
            itinerary.days.len()
        )));
    }

    let mut expected_date = range.start;
    for (idx, day) in itinerary.days.iter().enumerate() {
        let expected_number = idx as u32 + 1;
        if day.day_number != expected_number {
            return Err(TripError::Validation(format!(
                "day at position {} is numbered {}",
                expected_number, day.day_number
            )));
        }

        if day.date != expected_date {
            return Err(TripError::Validation(format!(
                "day {} is dated {}, expected {}",
                day.day_number, day.date, expected_date
            )));
        }
        expected_date = expected_date.succ_opt().unwrap_or(expected_date);

        let slots: Vec<TimeSlot> = day.activities.iter().map(|a| a.time_slot).collect();
        if slots != TimeSlot::ALL {
            return Err(TripError::Validation(format!(
                "day {} activities must be Morning, Afternoon, Evening; found {:?}",
                day.day_number, slots
            )));
        }

        if let Some(activity) = day
            .activities
            .iter()
            .find(|a| a.name.trim().is_empty() || a.description.trim().is_empty())
        {
            return Err(TripError::Validation(format!(
                "day {} {} activity has an empty name or description",
                day.day_number, activity.time_slot
            )));
        }

        let sum = day
            .activities
            .iter()
            .fold(0u32, |total, a| total.saturating_add(a.cost));
        if sum != day.daily_budget {
            return Err(TripError::Validation(format!(
                "day {} dailyBudget is {}, activities add up to {}",
                day.day_number, day.daily_budget, sum
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_itinerary, TripRequest};
    use chrono::NaiveDate;

    fn parsed() -> TripItinerary {
        let request = TripRequest::new(
            "Cairo",
            NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
        );
        parse_itinerary("Day 2\nMorning: Pyramids – Giza plateau – $30 – History", &request)
    }

    #[test]
    fn test_parsed_itinerary_round_trips_through_validation() {
        let itinerary = parsed();
        let value = serde_json::to_value(&itinerary).unwrap();
        let validated = validate_itinerary_value(&value).unwrap();

        assert_eq!(validated, itinerary);
    }

    #[test]
    fn test_schema_rejects_missing_activity() {
        let mut value = serde_json::to_value(parsed()).unwrap();
        value["days"][0]["activities"].as_array_mut().unwrap().pop();

        let err = validate_itinerary_value(&value).unwrap_err();
        assert!(err.to_string().contains("does not match schema"));
    }

    #[test]
    fn test_schema_rejects_negative_cost() {
        let mut value = serde_json::to_value(parsed()).unwrap();
        value["days"][1]["activities"][0]["cost"] = serde_json::json!(-5);

        assert!(validate_itinerary_value(&value).is_err());
    }

    #[test]
    fn test_invariants_catch_shuffled_slots() {
        let mut itinerary = parsed();
        itinerary.days[0].activities.swap(0, 2);

        let err = check_invariants(&itinerary).unwrap_err();
        assert!(err.to_string().contains("Morning, Afternoon, Evening"));
    }

    #[test]
    fn test_invariants_catch_missing_day() {
        let mut itinerary = parsed();
        itinerary.days.pop();

        assert!(check_invariants(&itinerary).is_err());
    }

    #[test]
    fn test_invariants_catch_wrong_budget() {
        let mut itinerary = parsed();
        itinerary.days[2].daily_budget += 1;

        let err = check_invariants(&itinerary).unwrap_err();
        assert!(err.to_string().contains("dailyBudget"));
    }

    #[test]
    fn test_invalid_json_document() {
        let err = validate_itinerary_str("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
