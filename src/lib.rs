// Export modules for testing
pub mod ai;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod progress;

// Integration modules
pub mod integrations;
pub mod providers;

// Command modules
pub mod commands;

// Domain modules
pub mod domain;
