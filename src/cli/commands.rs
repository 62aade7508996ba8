use crate::introspection::Target;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Build introspection for Razor web projects
#[derive(Parser, Debug)]
#[command(
    name = "razorscope",
    about = "Build introspection for Razor web projects",
    version,
    author,
    long_about = "razorscope reports which template files a Razor web project tracks for \
                  up-to-date checks, which file types are eligible for hot reload, and which \
                  files should be watched together. Output lines match what the SDK's \
                  _Introspect* targets print."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "List up-to-date check inputs and built artifacts",
        long_about = "Prints one 'UpToDateCheckInput: <path>' line per compiled template and one \
                      'UpToDateCheckBuilt: <path>' line per compiled views assembly.\n\n\
                      Examples:\n  \
                      razorscope up-to-date\n  \
                      razorscope up-to-date path/to/SimpleMvc.csproj -c Release"
    )]
    UpToDate(ProjectArgs),

    #[command(
        about = "Print the hot-reload eligible file types",
        long_about = "Prints 'UpToDateReloadFileTypes: <list>'.\n\n\
                      Examples:\n  \
                      razorscope reload-types\n  \
                      razorscope reload-types --remove-reload-type .cshtml\n  \
                      razorscope reload-types -p _RazorUpToDateReloadFileTypesAllowWorkaround=false"
    )]
    ReloadTypes(ProjectArgs),

    #[command(
        about = "List templates and companion files to watch",
        long_about = "Prints 'Watch: <path>' for every template followed by its companion files \
                      (for example Index.razor.css next to Index.razor).\n\n\
                      Examples:\n  \
                      razorscope watch\n  \
                      razorscope watch --format json"
    )]
    Watch(ProjectArgs),

    #[command(
        about = "Run one or more introspection targets by name",
        long_about = "Runs the named targets in order. Target names may be given as the SDK \
                      spells them (_IntrospectUpToDateCheck, _IntrospectUpToDateReloadFileTypes, \
                      _IntrospectWatchItems) or by subcommand name.\n\n\
                      Examples:\n  \
                      razorscope run -t _IntrospectUpToDateCheck -t _IntrospectWatchItems"
    )]
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(
        value_name = "PATH",
        help = "Project file or directory containing one (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'p',
        long = "property",
        value_name = "KEY=VALUE",
        help = "Set a global build property (repeatable)"
    )]
    pub properties: Vec<String>,

    #[arg(
        short = 'c',
        long,
        value_name = "NAME",
        help = "Build configuration (defaults to RAZORSCOPE_CONFIGURATION or Debug)"
    )]
    pub configuration: Option<String>,

    #[arg(long, value_name = "TFM", help = "Target framework, e.g. net5.0")]
    pub framework: Option<String>,

    #[arg(
        long,
        value_name = "TEXT",
        help = "Remove TEXT from the serialized reload file types"
    )]
    pub remove_reload_type: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(
        short = 't',
        long = "target",
        value_name = "TARGET",
        required = true,
        value_parser = parse_target,
        help = "Introspection target to run (repeatable)"
    )]
    pub targets: Vec<Target>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Human,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
        }
    }
}

fn parse_target(s: &str) -> Result<Target, String> {
    s.parse()
}
