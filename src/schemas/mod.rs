pub mod schema;
pub mod validation;

pub use schema::{itinerary_schema, request_schema};
pub use validation::{check_invariants, validate_itinerary_str, validate_itinerary_value};
