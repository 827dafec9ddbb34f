//! Domain entities - the core business objects.

mod post;

pub use post::{Author, NewPost, Post, PostFilter, PostPatch};
