pub mod output;
pub mod parse;
pub mod scan;

// Re-export command functions for convenience
pub use output::OutputFormat;
pub use parse::parse;
pub use scan::{scan, ScanParams};
