//! Event Handling Module
//!
//! - **`keys`**: Keyboard input processing for each input mode
//! - **`worker`**: Background threads running catalog requests for the TUI
//! - **`clipboard`**: Copying snippet code through the system clipboard tool
//!

pub mod clipboard;
pub mod keys;
pub mod worker;
