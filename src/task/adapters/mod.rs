//! Adapter implementations of the task engine's ports.

pub mod broadcast;
pub mod mail;
pub mod memory;
pub mod postgres;

pub use broadcast::{BroadcastRealtime, RealtimeEvent};
pub use mail::{MailTemplateError, MailTemplates, RenderedMail};
