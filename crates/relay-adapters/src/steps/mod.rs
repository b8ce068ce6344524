pub mod average;
pub mod topic_remap;

pub use average::WindowedAverageStep;
pub use topic_remap::TopicRemapStep;
