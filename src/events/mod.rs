//! # Events Module
//!
//! Event-driven progress reporting, GUI-ready.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Inspect(InspectEvent::ImageCompleted { path, .. }) = event {
//!             println!("Inspected {}", path.display());
//!         }
//!     }
//! });
//!
//! inspector.inspect_all_with_events(&paths, &sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
