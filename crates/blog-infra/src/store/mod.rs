//! Post store implementations - PostgreSQL lives under `database`, in-memory here.

mod memory;

pub use memory::InMemoryPostStore;
