//! Adapter implementations for the translator and image generator ports.
//!
//! - `live/` — Argos Translate and Hugging Face inference over HTTP
//! - `recording/` — Wrap live adapters and capture each call to a cassette
//! - `replaying/` — Serve captured calls back without touching the network

pub mod live;
pub mod recording;
pub mod replaying;
