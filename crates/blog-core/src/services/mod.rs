//! Application services built on top of the ports.

mod posts;

pub use posts::PostService;
