pub mod config;
pub mod logging;

pub mod batch;
pub mod exec;
pub mod job;
pub mod links;
pub mod pool;
pub mod preflight;
pub mod sequencer;
