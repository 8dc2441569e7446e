//! # Events Module
//!
//! Structured progress reporting for the organizer.
//!
//! ## Design
//! The core never prints. It emits [`Event`]s through a channel, each tagged
//! with a [`Severity`], and any presentation layer (CLI, GUI, test) decides
//! how to render them.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         println!("[{}] {}", event.severity(), event.message());
//!     }
//! });
//!
//! let organizer = Organizer::builder().events(sender).build();
//! organizer.organize(&request)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
