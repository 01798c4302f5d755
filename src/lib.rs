//! # paltool
//!
//! A pure-Rust toolkit for the localization pipeline of PAL-engine game
//! files.
//!
//! ## Supported operations
//!
//! - **PAC archives** - list and extract packed game files
//! - **File decryption** - reverse the per-word rotation/XOR obfuscation
//! - **Script scanning** - find dialogue and choice instructions in the raw
//!   bytecode stream
//! - **Text packs** - parse, translate, and rebuild the packed text blob
//! - **Relocation** - repatch every instruction to its text record's new
//!   offset after a rebuild
//!
//! ## Quick Start
//!
//! ### Working with PAC archives
//!
//! ```no_run
//! use paltool::pac::PacArchive;
//!
//! let mut pac = PacArchive::open("data.pac")?;
//! println!("Found {} files", pac.len());
//!
//! let script = pac.read_file("SCRIPT.SRC")?;
//! let text = pac.read_file("TEXT.DAT")?;
//! # Ok::<(), paltool::Error>(())
//! ```
//!
//! ### Exporting text for translation
//!
//! ```no_run
//! use paltool::relocate::Relocator;
//! use paltool::text::TextEncoding;
//!
//! let script = paltool::crypt::decrypt(&std::fs::read("SCRIPT.SRC")?);
//! let text = paltool::crypt::decrypt(&std::fs::read("TEXT.DAT")?);
//!
//! let session = Relocator::new(script, &text, TextEncoding::ShiftJis)?;
//! paltool::exchange::write_exchange("exchange.json", &session.export()?)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `paltool` command-line binary

pub mod crypt;
pub mod error;
pub mod exchange;
pub mod pac;
pub mod relocate;
pub mod script;
pub mod text;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::crypt::decrypt;
    pub use crate::error::{Error, Result};
    pub use crate::exchange::{ExchangeEntry, TextCell, read_exchange, write_exchange};
    pub use crate::pac::{PacArchive, PacEntry};
    pub use crate::relocate::{AuditReport, RebuildOutput, Relocator};
    pub use crate::script::{RecordKind, ScriptRecord, scan};
    pub use crate::text::{TextEncoding, TextEntry, TextPack, parse_text_bytes, read_text};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
