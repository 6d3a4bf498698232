pub mod itinerary;
pub mod record;
pub mod request;
