pub mod ai_client;
pub mod cost_service;
pub mod currency;
pub mod itinerary_generation_service;
pub mod itinerary_service;
pub mod mock_generator;
pub mod plan_validation;
pub mod prompt_service;
