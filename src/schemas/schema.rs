use schemars::schema::{RootSchema, SchemaObject};
use serde_json::Value;
use std::sync::OnceLock;

use crate::types::{TripItinerary, TripRequest};

/// JSON schema describing the serialized [`TripItinerary`].
pub fn itinerary_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let mut root = schemars::schema_for!(TripItinerary);
        apply_metadata(
            &mut root.schema,
            "TripItinerary",
            "Day-by-day trip schedule with three activities per day",
        );
        to_json(root)
    })
}

/// JSON schema describing the trip request body.
pub fn request_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let mut root = schemars::schema_for!(TripRequest);
        apply_metadata(
            &mut root.schema,
            "TripRequest",
            "Trip details used to prompt for and parse an itinerary",
        );
        to_json(root)
    })
}

fn apply_metadata(schema_object: &mut SchemaObject, title: &str, description: &str) {
    let metadata = schema_object.metadata();

    if metadata.title.is_none() {
        metadata.title = Some(title.to_string());
    }

    if metadata.description.is_none() {
        metadata.description = Some(description.to_string());
    }
}

fn to_json(root: RootSchema) -> Value {
    // RootSchema is plain data; serialization cannot fail.
    serde_json::to_value(root).unwrap_or(Value::Null)
}
