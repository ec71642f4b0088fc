use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use execgraph::cli::Cli;
use execgraph::config::{AppConfig, ConfigError, CONFIG_PATH};
use execgraph::pipeline::{self, OutputFormat};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("execgraph={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let result = match &cli.config {
        Some(path) => AppConfig::load_from_path(std::path::Path::new(path)),
        None => AppConfig::load(),
    };
    let mut config = match result {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(path)) if cli.config.is_none() => {
            // Default path missing: offer to create it when interactive.
            match AppConfig::prompt_create_config()? {
                Some(created) => {
                    println!("Created default configuration at {}", created.display());
                    AppConfig::load()?
                }
                None => {
                    return Err(anyhow::anyhow!(
                        "Configuration file not found at {}. Run with --init to create it.",
                        path.display()
                    ));
                }
            }
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(roster) = &cli.roster {
        config.paths.roster_file = roster.clone();
    }
    if let Some(atoms) = &cli.atoms {
        config.paths.atoms_file = atoms.clone();
    }
    if let Some(canonical) = &cli.canonical {
        config.paths.canonical_file = canonical.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.paths.output_dir = output_dir.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_tracing(cli.verbose);

    if cli.init {
        let path = AppConfig::create_default_config()?;
        println!("Created default configuration at {}", path.display());
        println!("Edit {} and run again to mine relationships.", CONFIG_PATH);
        return Ok(());
    }

    let config = load_config(&cli)?;
    // validate() already rejected unknown formats
    let format = OutputFormat::parse(&cli.format).unwrap_or(OutputFormat::Json);

    pipeline::run(&config, format)?;
    Ok(())
}
