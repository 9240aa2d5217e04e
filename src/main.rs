//! `jsmapper [-h] [-v]... <pattern>`
//!
//! Finds the input device whose name matches `pattern` and turns its stick movements into
//! arrow keys until the device goes away.

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use jsmapper::{Config, Translator, VirtualKeyboard};

#[derive(Parser, Debug)]
#[command(name = "jsmapper", version)]
#[command(about = "Translate joystick axis movements into arrow key presses")]
struct Cli {
    /// Increase verbosity: -v logs the matched device, -vv also logs every raw event
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,

    /// Glob matched against input device names, e.g. "*Pad*"
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pattern: String,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new(self.pattern.clone()).with_verbosity(self.verbose)
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &Config) -> Result<()> {
    let source = jsmapper::locate(config)?;
    let keyboard = VirtualKeyboard::directional()?;

    // Returns once the source stops delivering events; both devices are released on drop.
    Translator::new(source, keyboard, config).run()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    init_logging(&config);
    run(&config)
}
