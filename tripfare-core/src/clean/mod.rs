mod clean_bounds;
mod clean_ops;

pub use clean_bounds::{CleanBounds, OpenRange};
pub use clean_ops::{clean, CleanSummary};
