mod cache;
mod minify;

pub use cache::*;
pub use minify::*;
