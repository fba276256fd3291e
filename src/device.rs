//! @ai:module:intent Device sessions that execute a command and return its raw output
//! @ai:module:layer infrastructure
//! @ai:module:public_api Device, DeviceError, StaticDevice, ReplayDevice, capture_file_name
//! @ai:module:depends_on none

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// @ai:intent Failure to obtain output from a device; passed to callers unchanged
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("Device unreachable: {0}")]
    Unreachable(String),

    #[error("Command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("No capture for `{command}` at {path}")]
    NoCapture { command: String, path: PathBuf },

    #[error("IO error reading capture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// @ai:intent Something that runs a CLI command and returns its text
pub trait Device {
    fn execute(&self, command: &str) -> Result<String, DeviceError>;
}

impl<F> Device for F
where
    F: Fn(&str) -> Result<String, DeviceError>,
{
    fn execute(&self, command: &str) -> Result<String, DeviceError> {
        self(command)
    }
}

/// @ai:intent In-memory device answering from a fixed command table
#[derive(Debug, Clone, Default)]
pub struct StaticDevice {
    outputs: HashMap<String, String>,
}

impl StaticDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Register the output returned for a command
    pub fn with(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(normalize_command(command), output.to_string());
        self
    }
}

impl Device for StaticDevice {
    fn execute(&self, command: &str) -> Result<String, DeviceError> {
        self.outputs
            .get(&normalize_command(command))
            .cloned()
            .ok_or_else(|| DeviceError::CommandFailed {
                command: command.to_string(),
                message: "no output registered".to_string(),
            })
    }
}

/// @ai:intent Device replaying captured outputs stored one file per command
///
/// `show isis instance core hostname` is read from
/// `<dir>/show_isis_instance_core_hostname.txt`.
#[derive(Debug, Clone)]
pub struct ReplayDevice {
    dir: PathBuf,
}

impl ReplayDevice {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn capture_path(&self, command: &str) -> PathBuf {
        self.dir.join(capture_file_name(command))
    }
}

impl Device for ReplayDevice {
    /// @ai:effects fs:read
    fn execute(&self, command: &str) -> Result<String, DeviceError> {
        let path = self.capture_path(command);
        debug!(command, path = %path.display(), "replaying capture");
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DeviceError::NoCapture {
                command: command.to_string(),
                path,
            }),
            Err(source) => Err(DeviceError::Io { path, source }),
        }
    }
}

/// @ai:intent File name a command's capture is stored under
/// @ai:effects pure
pub fn capture_file_name(command: &str) -> String {
    let stem = command
        .split_whitespace()
        .map(|word| word.replace('/', "-"))
        .collect::<Vec<_>>()
        .join("_");
    format!("{}.txt", stem)
}

fn normalize_command(command: &str) -> String {
    command.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_capture_file_name() {
        assert_eq!(capture_file_name("show isis adjacency"), "show_isis_adjacency.txt");
        assert_eq!(
            capture_file_name("show isis interface  Gi0/0/0/1"),
            "show_isis_interface_Gi0-0-0-1.txt"
        );
    }

    #[test]
    fn test_static_device_ignores_spacing() {
        let device = StaticDevice::new().with("show evpn evi", "output");
        assert_eq!(device.execute("show  evpn evi ").unwrap(), "output");
        assert!(matches!(
            device.execute("show evpn evi detail"),
            Err(DeviceError::CommandFailed { .. })
        ));
    }

    #[test]
    fn test_replay_device_reads_capture() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("show_l2vpn_xconnect.txt"), "captured").unwrap();
        let device = ReplayDevice::new(dir.path());

        assert_eq!(device.execute("show l2vpn xconnect").unwrap(), "captured");
        match device.execute("show l2vpn xconnect detail") {
            Err(DeviceError::NoCapture { command, path }) => {
                assert_eq!(command, "show l2vpn xconnect detail");
                assert!(path.ends_with("show_l2vpn_xconnect_detail.txt"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_closure_is_a_device() {
        let device = |_: &str| -> Result<String, DeviceError> {
            Err(DeviceError::Unreachable("10.0.0.1".to_string()))
        };
        assert!(matches!(device.execute("show isis"), Err(DeviceError::Unreachable(_))));
    }
}
