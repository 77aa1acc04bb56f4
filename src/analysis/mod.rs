//! Analysis over the entry log: daily selection and windowed aggregation.

pub mod aggregator;
pub mod daily;

pub use aggregator::*;
pub use daily::*;
