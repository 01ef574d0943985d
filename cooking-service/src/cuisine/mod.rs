//! Pure cooking-domain logic: no I/O, no shared state.

pub mod dishes;
pub mod learning;
pub mod normalize;
pub mod nutrition;
pub mod prompt;
pub mod region;
pub mod suggestions;

pub use normalize::{extract_json_object, normalize, normalize_food_analysis};
pub use prompt::{build_chat_prompt, build_prompt, build_vision_prompt, language_instruction};
pub use region::{InvalidCoordinate, Region, check_coordinate, classify};
pub use suggestions::{Language, suggestions};
