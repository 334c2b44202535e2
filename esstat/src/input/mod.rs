//! Keyboard input: byte sources, the listener thread and the key decoder.

pub mod decoder;
pub mod listener;
pub mod source;

pub use decoder::{KeyDecoder, KeyEvent};
pub use listener::InputListener;
pub use source::{InputSource, StdinSource};
