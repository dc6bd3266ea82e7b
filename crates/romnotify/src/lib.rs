pub mod artifact;
pub mod cli;
pub mod error;
pub mod message;
pub mod orchestrator;
pub mod settings;
pub mod sink;
