//! Feature slices for the TUI, one per view.

pub mod auth;
pub mod composer;
pub mod events;
pub mod pages;
