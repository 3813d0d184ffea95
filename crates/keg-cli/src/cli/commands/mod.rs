//! CLI command handlers. Each command is in its own file.

mod available;
mod checksum;
mod completions;
mod fetch;
mod install;
mod list;
mod remove;
mod show;

pub use available::run_available;
pub use checksum::run_checksum;
pub use completions::run_completions;
pub use fetch::run_fetch;
pub use install::run_install;
pub use list::run_list;
pub use remove::run_remove;
pub use show::run_show;
