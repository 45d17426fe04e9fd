//! Action primitives - the browser and API vocabulary of a screenplay
//!
//! This crate provides the building blocks actors perform:
//! - 2 abilities: [`BrowseTheWeb`] and [`CallAnApi`]
//! - Browser interactions: open, enter, click, scroll, wait-until, wait-for-load
//! - REST interactions: get, post, put, patch, delete
//! - Questions over page text, visibility, url, title and the last API response
//!
//! Every browser interaction waits for its target within the ability's
//! [`WaitPolicy`] and bounds each driver command by the action timeout.

pub mod abilities;
mod errors;
pub mod interactions;
pub mod questions;
mod waiting;

pub use abilities::{BrowseTheWeb, CallAnApi, WaitPolicy};
pub use interactions::*;
pub use questions::*;
pub use waiting::Readiness;
