mod keyboard;
mod pointer;

pub use keyboard::{wire_keydown, wire_unlock, wire_unlock_except};
pub use pointer::{wire_pointermove, PointerSample};
