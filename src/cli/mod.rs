mod args;
mod evaluate;
mod question;
mod setup;

pub use args::{Action, Args};
pub use evaluate::run_evaluate;
pub use question::{format_result, open_searcher, run_question};
pub use setup::run_setup;

pub const USAGE_HINT: &str = "Please specify an action: --setup, --question, or --evaluate";
