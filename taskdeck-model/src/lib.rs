//! Shared record definitions for the `TaskDeck` board engine.

pub mod activity;
pub mod codec;
pub mod conflict;
pub mod task;
pub mod time;
pub mod user;
