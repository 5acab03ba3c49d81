//! Link control: the session handle, the state it shares with interrupt
//! context, and the event vocabularies flowing between them.
pub mod config;
pub mod events;
pub mod handle;
pub mod queue;
pub mod state;
