//! Analysis - 切片选择与统计指标

mod metrics;
mod slices;

pub use metrics::compute_metrics;
pub use slices::{select_scope, MIN_EPISODE_LENGTH, SLICE_MIN, TARGET_SIZE};
