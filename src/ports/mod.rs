//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`, except the
//! terminal presenter which lives next to the CLI.

pub mod image_generator;
pub mod presenter;
pub mod translator;

pub use image_generator::{GeneratedImage, ImageGenerator, ImageRequest};
pub use presenter::Presenter;
pub use translator::{TranslationRequest, TranslationResponse, Translator};
