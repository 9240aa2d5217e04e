/// Everything a run needs to know, built once from the command line and handed to the
/// locator and translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Glob matched against the names of devices under `/dev/input`.
    pub pattern: String,
    /// Number of `-v` flags given.
    pub verbosity: u8,
}

impl Config {
    pub fn new(pattern: impl Into<String>) -> Self {
        Config {
            pattern: pattern.into(),
            verbosity: 0,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn logs_matched_device(&self) -> bool {
        self.verbosity >= 1
    }

    pub fn logs_raw_events(&self) -> bool {
        self.verbosity >= 2
    }
}
