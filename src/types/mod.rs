pub mod itinerary;
pub mod trip;

pub use itinerary::{TimeSlot, TripActivity, TripDay, TripItinerary, Weather};
pub use trip::{Accommodation, DateRange, TripRequest, MAX_TRIP_DAYS};
