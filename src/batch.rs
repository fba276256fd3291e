//! @ai:module:intent Parse a directory of captured command outputs and report per-file status
//! @ai:module:layer application
//! @ai:module:public_api check_capture, check_directory, BatchResult, CaptureReport, CaptureStatus
//! @ai:module:depends_on registry, extractor, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::extractor::ExtractOptions;
use crate::registry::detect_command;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// @ai:intent Outcome for one capture file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStatus {
    Parsed,
    Failed,
    /// No parser recognized the capture's command.
    Skipped,
}

/// @ai:intent Status of one capture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport {
    pub path: PathBuf,
    pub command: Option<String>,
    pub status: CaptureStatus,
    pub message: Option<String>,
}

/// @ai:intent Result of checking a capture directory
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchResult {
    pub files_checked: usize,
    pub parsed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub captures: Vec<CaptureReport>,
}

impl BatchResult {
    /// @ai:intent True when no recognized capture failed to parse
    pub fn passed(&self) -> bool {
        self.failed == 0
    }

    pub fn push(&mut self, report: CaptureReport) {
        self.files_checked += 1;
        match report.status {
            CaptureStatus::Parsed => self.parsed += 1,
            CaptureStatus::Failed => self.failed += 1,
            CaptureStatus::Skipped => self.skipped += 1,
        }
        self.captures.push(report);
    }
}

/// @ai:intent Detect the command of one capture and parse it
/// @ai:post Err only when the file cannot be read; parse failures are reported as Failed
/// @ai:effects fs:read
pub fn check_capture(path: &Path, options: &ExtractOptions) -> Result<CaptureReport> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let Some((parser, params)) = detect_command(&text, path) else {
        return Ok(CaptureReport {
            path: path.to_path_buf(),
            command: None,
            status: CaptureStatus::Skipped,
            message: Some("command not recognized".to_string()),
        });
    };

    let (status, message) = match parser.parse_output(&text, &params, options) {
        Ok(_) => (CaptureStatus::Parsed, None),
        Err(e) => {
            warn!(path = %path.display(), command = parser.name, error = %e, "capture failed");
            (CaptureStatus::Failed, Some(e.to_string()))
        }
    };
    Ok(CaptureReport {
        path: path.to_path_buf(),
        command: Some(parser.name.to_string()),
        status,
        message,
    })
}

/// @ai:intent Check every `.txt` capture below a directory, in path order
/// @ai:effects fs:read
pub fn check_directory(path: &Path, options: &ExtractOptions) -> Result<BatchResult> {
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let mut result = BatchResult::default();

    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let file_path = entry.path();
        info!(path = %file_path.display(), "checking capture");

        match check_capture(file_path, options) {
            Ok(report) => result.push(report),
            Err(e) => result.push(CaptureReport {
                path: file_path.to_path_buf(),
                command: None,
                status: CaptureStatus::Failed,
                message: Some(e.to_string()),
            }),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EVI: &str = "RP/0/RSP1/CPU0:Router1#show evpn evi\n1000  VPWS:1000  VPWS (vlan-unaware)\n";

    #[test]
    fn test_directory_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a_evi.txt"), EVI).unwrap();
        fs::write(dir.path().join("show_l2vpn_xconnect.txt"), "nothing to see\n").unwrap();
        fs::write(dir.path().join("c_unknown.txt"), "Router#show bgp summary\n").unwrap();
        fs::write(dir.path().join("notes.md"), EVI).unwrap();

        let result = check_directory(dir.path(), &ExtractOptions::default()).unwrap();
        assert_eq!(result.files_checked, 3);
        assert_eq!((result.parsed, result.failed, result.skipped), (1, 1, 1));
        assert!(!result.passed());

        let statuses: Vec<_> = result.captures.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![CaptureStatus::Parsed, CaptureStatus::Skipped, CaptureStatus::Failed]
        );
        assert_eq!(result.captures[2].command.as_deref(), Some("show l2vpn xconnect"));
    }

    #[test]
    fn test_capture_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("evi.txt");
        fs::write(&path, EVI).unwrap();

        let report = check_capture(&path, &ExtractOptions::default()).unwrap();
        assert_eq!(report.status, CaptureStatus::Parsed);
        assert_eq!(report.command.as_deref(), Some("show evpn evi"));
        assert!(report.message.is_none());
    }

    #[test]
    fn test_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("x.txt");
        fs::write(&file, "").unwrap();

        assert!(matches!(
            check_directory(&file, &ExtractOptions::default()),
            Err(Error::NotADirectory(_))
        ));
    }
}
