//! CLI command handlers, one per file.

mod completions;
mod detect;
mod fetch;
mod formats;

pub use completions::run_completions;
pub use detect::run_detect;
pub use fetch::run_fetch;
pub use formats::run_formats;
