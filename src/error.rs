//! Error types for `paltool`

use thiserror::Error;

/// The error type for `paltool` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== PAC Archive Errors ====================
    /// The directory bounds are inconsistent with the archive size.
    #[error("malformed PAC directory: {reason}")]
    MalformedPacDirectory {
        /// What is inconsistent.
        reason: String,
    },

    /// A directory entry points past the end of the archive.
    #[error("PAC entry '{name}' out of bounds: offset {offset} + size {size} exceeds file size {file_size}")]
    PacEntryOutOfBounds {
        /// The entry's name.
        name: String,
        /// The entry's data offset.
        offset: u32,
        /// The entry's stored size.
        size: u32,
        /// The archive size.
        file_size: u64,
    },

    /// The requested file was not found in the archive directory.
    #[error("file not found in PAC: {0}")]
    FileNotFoundInPac(String),

    // ==================== Text Pack Errors ====================
    /// The blob is shorter than the fixed pack header.
    #[error("text pack too small: {size} bytes")]
    TextPackTooSmall {
        /// The blob size in bytes.
        size: usize,
    },

    /// A record has no NUL terminator before the end of the blob.
    #[error("unterminated text entry at offset {offset}")]
    UnterminatedTextEntry {
        /// The record's start offset.
        offset: usize,
    },

    // ==================== Relocation Errors ====================
    /// A text offset does not resolve to any record in the pack.
    #[error("unresolved text offset {offset}")]
    UnresolvedTextOffset {
        /// The dangling offset.
        offset: u32,
    },

    /// A script offset does not resolve to any recognized instruction.
    #[error("unresolved script offset {offset}")]
    UnresolvedScriptOffset {
        /// The dangling offset.
        offset: u32,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for `paltool` operations.
pub type Result<T> = std::result::Result<T, Error>;
