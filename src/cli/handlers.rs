use crate::cli::commands::ProjectArgs;
use crate::cli::output::{IntrospectionReport, OutputFormatter};
use crate::config::{ConfigError, RazorscopeConfig};
use crate::fs::RealFileSystem;
use crate::introspection::{introspect, reload::RELOAD_FILE_TYPES_PROPERTY, ReloadTransform, Target};
use crate::project::{has_unevaluated_reference, BuildProperties, ProjectLoader};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

const CONFIGURATION_PROPERTY: &str = "Configuration";
const TARGET_FRAMEWORK_PROPERTY: &str = "TargetFramework";

/// Runs `targets` in order against the project named by `args` and prints the
/// combined report. Returns the process exit code.
pub fn handle_introspect(args: &ProjectArgs, targets: &[Target], config: &RazorscopeConfig) -> i32 {
    match run_introspect(args, targets, config) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_introspect(
    args: &ProjectArgs,
    targets: &[Target],
    config: &RazorscopeConfig,
) -> Result<()> {
    let report = build_report(args, targets, config)?;
    let output = OutputFormatter::new(args.format.into()).format(&report)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output written to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Loads the project and runs every target, without printing anything.
pub fn build_report(
    args: &ProjectArgs,
    targets: &[Target],
    config: &RazorscopeConfig,
) -> Result<IntrospectionReport> {
    let project_path = args
        .project_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    debug!("Project path: {}", project_path.display());

    let global = global_properties(args).context("Invalid command-line property")?;

    let fs = RealFileSystem::new();
    let mut project = ProjectLoader::new(&fs)
        .load(&project_path, &global)
        .with_context(|| format!("Failed to load project from {}", project_path.display()))?;

    if project
        .properties
        .get(CONFIGURATION_PROPERTY)
        .map_or(true, has_unevaluated_reference)
    {
        project
            .properties
            .set(CONFIGURATION_PROPERTY, config.configuration.as_str());
    }

    let mut report = IntrospectionReport::new(project.name.clone());
    for &target in targets {
        debug!(target = %target, "Running target");
        report.push(target, introspect(&project, target));
    }
    Ok(report)
}

/// Collects global properties from `-p`, `-c`, `--framework` and
/// `--remove-reload-type`. Dedicated flags win over `-p` assignments.
pub fn global_properties(args: &ProjectArgs) -> Result<BuildProperties, ConfigError> {
    let mut properties = BuildProperties::from_assignments(&args.properties)?;

    if let Some(configuration) = &args.configuration {
        properties.set(CONFIGURATION_PROPERTY, configuration.as_str());
    }
    if let Some(framework) = &args.framework {
        properties.set(TARGET_FRAMEWORK_PROPERTY, framework.as_str());
    }
    if let Some(removed) = &args.remove_reload_type {
        properties.set(
            RELOAD_FILE_TYPES_PROPERTY,
            ReloadTransform::remove(removed.as_str()).to_expression(),
        );
    }

    Ok(properties)
}
