mod config;
mod get;
mod shell;

pub use config::run_config;
pub use get::run_get;
pub use shell::run_shell;

#[cfg(test)]
pub(crate) use get::default_destination;
#[cfg(test)]
pub(crate) use shell::run_shell_with;
