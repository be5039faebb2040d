pub mod statistics;
pub mod tracker;

pub use statistics::compute_statistics;
pub use tracker::GameTracker;
