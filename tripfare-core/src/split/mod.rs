mod output_tag;
mod split_config;
mod split_ops;
mod split_writer;

pub use output_tag::{OutputTag, SplitLabel};
pub use split_config::SplitConfig;
pub use split_ops::{assign_splits, split_off, SplitAssignment};
pub use split_writer::{split_and_write, Written};
