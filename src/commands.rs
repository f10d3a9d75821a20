// Command handlers module
// This module contains all CLI command implementations

pub mod checkout_new;
pub mod create;
pub mod init;
pub mod setup;
