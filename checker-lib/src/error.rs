use thiserror::Error;

use crate::config::Role;

/// Structural failures: the spreadsheet cannot be interpreted at all, so no result
/// records are produced for the request.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Sheet '{sheet}' not found. Available sheets: {available:?}")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error(
        "Could not locate a header row containing columns for {required:?} or the {anchor} column"
    )]
    HeaderNotFound { required: Vec<Role>, anchor: Role },

    #[error("Required column missing for {role}. Available columns: {available:?}")]
    MissingRequiredColumn { role: Role, available: Vec<String> },

    #[error("Error reading workbook '{path}': {message}")]
    Workbook { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CheckError {
    /// Short category used as the heading of an error log entry
    pub fn category(&self) -> &'static str {
        match self {
            CheckError::SheetNotFound { .. } => "Sheet Lookup Error",
            CheckError::HeaderNotFound { .. } => "Header Detection Error",
            CheckError::MissingRequiredColumn { .. } => "Column Resolution Error",
            CheckError::Workbook { .. } => "Workbook Read Error",
            CheckError::InvalidConfig(_) => "Configuration Error",
        }
    }
}

/// Failures confined to a single key; the rest of the batch carries on
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("{0} is blank")]
    BlankKey(&'static str),

    #[error(transparent)]
    Structural(#[from] CheckError),
}

pub type Result<T, E = CheckError> = std::result::Result<T, E>;
