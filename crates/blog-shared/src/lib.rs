//! # Blog Shared
//!
//! Wire types for the blog post API, usable by both the server and its clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
