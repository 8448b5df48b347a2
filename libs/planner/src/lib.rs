//! Itinerary generation, refinement and object identification on top of a
//! text-generation model and an image classifier.

pub mod client;
pub mod completion;
pub mod config;
pub mod error;
pub mod identify;
pub mod language;
pub mod normalize;
pub mod prompt;
pub mod service;

pub use client::{Classification, ImageClassifier, TextCompletion};
pub use config::{GenerationSettings, IdentificationSettings};
pub use error::PlannerError;
pub use identify::Identifier;
pub use service::ItineraryService;
