use propbind::cli::{parse_assignment, Args};
use propbind::config::ModelConfig;
use propbind::demo::{self, MixerSetup};
use propbind::entities::PropValue;
use propbind::Model;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;

fn init_logging(args: &Args) -> Result<()> {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| PathBuf::from("propbind.log"));
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!(
            "Logging to file: {} (level: {:?})",
            log_path.display(),
            log_level
        );
    } else {
        // Respects RUST_LOG if set
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<ModelConfig> {
    let mut config = match &args.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    if args.no_warnings {
        config.show_warnings = false;
    }
    if args.auto_link {
        config.auto_link_properties = true;
    }
    Ok(config)
}

/// Parse every `NAME=VALUE` argument up front so a typo fails before any update.
fn assignments(raw: &[String]) -> Result<Vec<(String, PropValue)>> {
    let mut parsed = Vec::with_capacity(raw.len());
    for arg in raw {
        let Some((name, value)) = parse_assignment(arg) else {
            bail!("Expected NAME=VALUE, got '{}'", arg);
        };
        parsed.push((name.to_string(), PropValue::parse_literal(value)));
    }
    Ok(parsed)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    debug!("Command-line args: {:?}", args);

    let config = load_config(&args)?;
    let sets = assignments(&args.set)?;
    let edits = assignments(&args.edit)?;

    let model = Model::from_setup(config, &MixerSetup);
    let root = demo::mixer_panel();
    let created = demo::bind(&model, &root)?;
    if !created.is_empty() {
        info!("Auto-linked properties: {:?}", created);
    }

    for (name, value) in sets {
        if !model.has_property(&name) {
            warn!("Unknown property '{}', ignored", name);
            continue;
        }
        model
            .update_property(&name, value)
            .with_context(|| format!("Failed to update '{}'", name))?;
    }

    for (name, value) in edits {
        demo::edit(&model, &name, &value)?;
    }

    if args.reset {
        model.reset(true).context("Failed to reset properties")?;
    }

    let json = serde_json::to_string_pretty(&*model.properties())
        .context("Failed to serialize properties")?;
    println!("{}", json);
    Ok(())
}
