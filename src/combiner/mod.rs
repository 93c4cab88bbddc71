pub mod block;
pub mod file_combiner;

pub use block::{end_marker, start_marker, write_block};
pub use file_combiner::{CombineProgress, CombineReport, Combiner};
