use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "execgraph")]
#[command(about = "Mines colleague, alumni, former-employer, regulator and successor relationships from an executive roster")]
#[command(version)]
pub struct Cli {
    /// Create default configuration file at ./config/execgraph.toml
    #[arg(long)]
    pub init: bool,

    /// Path to a configuration file (defaults to ./config/execgraph.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Company roster JSON (overrides config)
    #[arg(long, value_name = "FILE")]
    pub roster: Option<String>,

    /// Bio atoms JSON (overrides config)
    #[arg(long, value_name = "FILE")]
    pub atoms: Option<String>,

    /// Canonical name table JSON (overrides config)
    #[arg(long, value_name = "FILE")]
    pub canonical: Option<String>,

    /// Output directory for results (overrides config)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Relationship output format: 'json', 'csv', or 'both'
    #[arg(short = 'f', long, default_value = "json")]
    pub format: String,

    /// Verbose logging (use -v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if !["json", "csv", "both"].contains(&self.format.as_str()) {
            return Err("Output format must be 'json', 'csv', or 'both'".to_string());
        }
        for (flag, value) in [
            ("--config", &self.config),
            ("--roster", &self.roster),
            ("--atoms", &self.atoms),
            ("--canonical", &self.canonical),
            ("--output-dir", &self.output_dir),
        ] {
            if let Some(v) = value {
                if v.is_empty() {
                    return Err(format!("{} cannot be empty", flag));
                }
            }
        }
        Ok(())
    }
}
