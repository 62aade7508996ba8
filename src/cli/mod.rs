pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, OutputFormatArg, ProjectArgs, RunArgs};
pub use output::{IntrospectionReport, OutputFormat, OutputFormatter};
