//! Conversational core for the Fortuna bot.
//!
//! Everything here is transport-agnostic: the router turns one inbound
//! message into an ordered list of replies, mutating per-user state (daily
//! records, prediction history, dialog sessions) under a single store.
//! Sending, pacing, and keyboards belong to the service crate.

pub mod audit;
pub mod command;
pub mod daily;
pub mod history;
pub mod loader;
pub mod pool;
pub mod router;
pub mod session;
pub mod store;

pub use audit::{AuditSink, NullAudit};
pub use command::Command;
pub use pool::{Category, ContentPool};
pub use router::{InboundEvent, Reply, ReplyFormat, Responder};
pub use store::UserId;
