use razorscope::cli::commands::{CliArgs, Commands};
use razorscope::cli::handlers::handle_introspect;
use razorscope::introspection::Target;
use razorscope::util::logging::{init_logging, parse_level, LoggingConfig};
use razorscope::{RazorscopeConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    let config = RazorscopeConfig::default();
    init_logging_from_args(&args, &config);

    debug!("razorscope v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        eprintln!("\nPlease check your RAZORSCOPE_* environment variables.");
        std::process::exit(1);
    }
    debug!("{}", config);

    let exit_code = match &args.command {
        Commands::UpToDate(project) => handle_introspect(project, &[Target::UpToDateCheck], &config),
        Commands::ReloadTypes(project) => {
            handle_introspect(project, &[Target::UpToDateReloadFileTypes], &config)
        }
        Commands::Watch(project) => handle_introspect(project, &[Target::WatchItems], &config),
        Commands::Run(run) => handle_introspect(&run.project, &run.targets, &config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &RazorscopeConfig) {
    let mut logging = LoggingConfig::from_config(config);

    logging.level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        logging.level
    };

    init_logging(logging);
}
