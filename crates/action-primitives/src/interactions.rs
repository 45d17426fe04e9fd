//! Interactions: the atomic steps an actor performs through its abilities
//!
//! Browser interactions:
//! 1. open - navigate to a url (returns once the navigation is issued)
//! 2. enter - type a value into a target
//! 3. click - click a target
//! 4. scroll - scroll the page or bring a target into view
//! 5. wait - wait for a target to become visible, or for the page to load
//!
//! API interactions send one request each and keep the response as the
//! actor's last response.

mod click;
mod enter;
mod open;
mod rest;
mod scroll;
mod wait;

pub use click::*;
pub use enter::*;
pub use open::*;
pub use rest::*;
pub use scroll::*;
pub use wait::*;
