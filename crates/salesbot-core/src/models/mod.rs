//! Data models for the admin client
//!
//! Wire records exchanged with the admin backend and the form payloads used to
//! create and edit them.

mod document;
mod form;
mod responses;
mod shop;

pub use document::*;
pub use form::*;
pub use responses::*;
pub use shop::*;
