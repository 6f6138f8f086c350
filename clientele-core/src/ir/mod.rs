mod graph;
mod spec;
mod types;

#[cfg(test)]
mod tests;

pub use graph::{Dependency, SchemaGraph};
pub use spec::ApiSpec;
pub use types::*;
