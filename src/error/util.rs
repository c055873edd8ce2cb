//! Utility functions for error handling
//!
//! File access helpers that turn IO failures into [`TrialError::FileAccess`]
//! with the offending path attached.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, TrialError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(TrialError::file_access(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found (needed for {purpose})"),
            ),
        ));
    }

    if !path.is_file() {
        return Err(TrialError::file_access(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a file (expected a file for {purpose})"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied - check file permissions".to_string(),
            _ => format!("failed to open file for {purpose}: {e}"),
        };
        TrialError::file_access(path, io::Error::new(e.kind(), message))
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Err(TrialError::parse(
            path,
            "file contains invalid UTF-8 data - cannot read as text",
        )),
        Err(e) => Err(TrialError::file_access(path, e)),
    }
}
