pub mod generator;
pub mod metrics;
pub mod places;
pub mod providers;

pub use generator::{ExternalProvider, MockProvider, RecipeGenerator};
pub use places::{GooglePlacesClient, MockPlaces, PlaceSearch};
