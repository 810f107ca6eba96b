use anyhow::{anyhow, Result};
use clap::Parser;

use rulesync::cli::{handle_error, Args, CliConfig, CliUtils, Commands, ConvertArgs, ProgressReporter, StatsFormat};
use rulesync::conversion::{self, collect_files, convert_batch, ConvertOptions, Platform};
use rulesync::replication::{self, ReplicationEngine};

fn main() {
    let args = Args::parse();
    console::set_colors_enabled(CliUtils::should_use_color());
    console::set_colors_enabled_stderr(CliUtils::should_use_color());

    if let Err(error) = run(args) {
        handle_error(&error);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_args(args)?;

    match config.args.command.clone() {
        None => handle_replication(&config),
        Some(Commands::Egern(convert)) => handle_conversion(&config, Platform::Egern, &convert),
        Some(Commands::Singbox(convert)) => handle_conversion(&config, Platform::Singbox, &convert),
    }
}

fn handle_replication(config: &CliConfig) -> Result<()> {
    let replication_config = config
        .replication_config
        .as_ref()
        .ok_or_else(|| anyhow!("Replication configuration was not built"))?;
    CliUtils::show_verbose(
        &format!(
            "Replicating *{} from {}",
            replication_config.match_suffix,
            replication_config.source_root.display()
        ),
        config.is_verbose(),
    );
    if !replication_config.source_root.exists() {
        CliUtils::show_warning(
            &format!(
                "Source directory {} does not exist",
                replication_config.source_root.display()
            ),
            config.is_quiet(),
        );
    }

    let engine = ReplicationEngine::new(replication_config.clone())?;
    let mut reporter = ProgressReporter::new(config);
    let report = engine.run(&mut reporter)?;
    reporter.finish();

    CliUtils::show_status(replication::COMPLETION_MESSAGE, config.is_quiet());

    match config.stats_format() {
        Some(StatsFormat::Text) if !config.is_quiet() => {
            println!();
            for line in CliUtils::report_lines(&report) {
                println!("{}", line);
            }
        }
        Some(StatsFormat::Json) if !config.is_quiet() => println!("{}", report.to_json()?),
        _ => {}
    }

    Ok(())
}

fn handle_conversion(config: &CliConfig, platform: Platform, args: &ConvertArgs) -> Result<()> {
    let files = collect_files(&args.path, platform)?;
    if files.is_empty() {
        CliUtils::show_status(
            &format!("No files found in: {}", args.path.display()),
            config.is_quiet(),
        );
        return Ok(());
    }
    CliUtils::show_verbose(
        &format!("Converting {} files for {}", files.len(), platform.name()),
        config.is_verbose(),
    );

    let options = ConvertOptions {
        url_base: args.url_base.clone(),
    };
    let summary = convert_batch(&files, platform, &options, |file, result| match result {
        Ok(_) => CliUtils::show_success(
            &format!("Processed ({}): {}", platform.name(), file.display()),
            config.is_quiet(),
        ),
        Err(e) => CliUtils::show_error(&format!("Failed to process {}: {}", file.display(), e)),
    });

    CliUtils::show_status(conversion::COMPLETION_MESSAGE, config.is_quiet());
    summary.into_result()?;
    Ok(())
}
