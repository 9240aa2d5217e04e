use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons the device locator could not hand back a source device.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("failed to open {}", .dir.display())]
    Namespace {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to locate device matching \"{pattern}\"")]
    NotFound { pattern: String },
}

/// Failures while bringing up the virtual keyboard.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to open {}", .path.display())]
    Uinput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to register {what}")]
    Register {
        what: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to setup uinput device")]
    Setup(#[source] io::Error),
    #[error("failed to create uinput device")]
    Create(#[source] io::Error),
}

/// The only translator failure that escapes the loop; read errors end it quietly.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to write input event")]
    Emit(#[source] io::Error),
}
