pub mod config;
mod error;
mod report;
mod score;

pub use error::*;
pub use report::*;
pub use score::*;
