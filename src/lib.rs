pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod journal_entry;
pub mod local_store;
pub mod merge;
pub mod remote;
pub mod search;
pub mod sync;
