pub mod group;
pub mod project;

pub use group::*;
pub use project::*;
