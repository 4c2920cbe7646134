use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::utils::get_utc_iso_datetime;

/// Centralized function to append error messages to an error log file
///
/// # Arguments
/// * `log_file` - Path of the log file; created when missing
/// * `error_type` - A description of the error type/category (e.g., "Header Detection Error")
/// * `error_message` - The actual error message content
pub fn write_error_to_log(log_file: &Path, error_type: &str, error_message: &str) {
    let timestamp = get_utc_iso_datetime();
    let log_entry = format!("\n[{}] {}:\n{}\n", timestamp, error_type, error_message);

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", log_entry);
        }
        Err(e) => {
            tracing::warn!(log_file = %log_file.display(), "could not open error log: {e}");
        }
    }
}
