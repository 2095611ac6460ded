//! HTTP and WebSocket handlers.

mod pages;
mod ws;

pub use pages::{index_handler, test_handler};
pub use ws::ws_handler;
