//! Runtime for driving a tutoring conversation
//!
//! Owns the session fields and executes the effects the state machine
//! asks for, one event at a time.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationController;
