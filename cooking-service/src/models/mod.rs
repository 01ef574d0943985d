//! Domain models for the cooking service.

pub mod chat;
pub mod language;
pub mod lenient;
pub mod place;
pub mod recipe;
pub mod vision;

pub use chat::{ChatReply, ChatRequest, ChatTurn};
pub use place::{NearbyQuery, Place, PlaceLocation};
pub use recipe::{Difficulty, GeneratedRecipe, RecipeRecord, RecipeRequest};
pub use vision::{AnalyzedImage, FoodAnalysis};
