//! Debounced search-as-you-type.
//!
//! This module provides a cancellable timer (`Debouncer`) and the
//! `SearchController` that uses it to turn keystrokes into catalog searches.

mod controller;
mod debounce;

pub use controller::{SearchController, SearchSnapshot};
pub use debounce::{Debouncer, TimerHandle};
