//! User Interface Module
//!
//! Rendering for the terminal catalog viewer. Nothing in here touches the
//! network or mutates the catalog; it only reads from [`crate::app::App`].

pub mod catalog;
pub mod colors;
pub mod components;
pub mod form;
pub mod highlight;
