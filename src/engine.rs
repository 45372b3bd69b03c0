//! Scanning engine: decoding, filtering, matching and the success marker

pub mod decoder;
pub mod file_filter;
pub mod file_walker;
pub mod marker;
pub mod scanner;

pub use decoder::Encoding;
pub use file_filter::FileFilter;
pub use marker::Marker;
pub use scanner::{ScanResult, Scanner};
