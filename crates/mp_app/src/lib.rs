//! Editor and writer sessions: the state the formatter works on, and the
//! actions that move it forward.

mod busy;
pub mod clipboard;
pub mod editor;
pub mod notice;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use clipboard::{Clipboard, ClipboardPayload, FileClipboard};
pub use editor::{EditorSession, INITIAL_CONTENT};
pub use notice::Notice;
pub use writer::WriterSession;
