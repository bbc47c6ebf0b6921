pub mod analysis;
pub mod error;
pub mod io;
pub mod model;
pub mod report;
pub mod tally;

pub use error::{Result, ToolError};
