pub mod path;
mod types;

pub use path::{BadPath, PathFragment, PathSegment};
pub use types::*;
