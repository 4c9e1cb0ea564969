//! Live adapters that talk to the real HTTP services.

pub mod argos;
pub mod huggingface;
