//! Outbound service integrations.

pub mod providers;
