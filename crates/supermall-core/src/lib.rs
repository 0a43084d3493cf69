// ABOUTME: Core library for supermall, containing domain records and the UI action type.
// ABOUTME: This crate defines the shared data model used across all supermall components.

pub mod command;
pub mod model;

pub use command::UiAction;
pub use model::{
    Category, Collection, LogEntry, LogLevel, Offer, Product, Role, Shop, Status, UserRecord,
};
