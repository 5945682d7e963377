pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod logbook;
pub mod logging;
pub mod preview;
pub mod scanner;
