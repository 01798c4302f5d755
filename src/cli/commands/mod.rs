use clap::Subcommand;
use std::path::PathBuf;

use crate::text::TextEncoding;

pub mod crypt;
pub mod pac;
pub mod script;

#[derive(Subcommand)]
pub enum Commands {
    /// PAC archive operations
    Pac {
        #[command(subcommand)]
        command: PacCommands,
    },

    /// Decrypt an obfuscated script or text file
    Decrypt {
        /// File to decrypt
        source: PathBuf,

        /// Output file (defaults to appending .dec)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Script/text localization operations
    Script {
        #[command(subcommand)]
        command: ScriptCommands,
    },
}

/// PAC archive commands
#[derive(Subcommand)]
pub enum PacCommands {
    /// List archive contents
    List {
        /// PAC file
        source: PathBuf,

        /// Show sizes and offsets
        #[arg(short, long)]
        detailed: bool,
    },

    /// Extract files from an archive
    Extract {
        /// PAC file
        source: PathBuf,

        /// Output directory
        #[arg(short, long)]
        destination: PathBuf,

        /// Only extract the named files (all files when omitted)
        #[arg(long)]
        file: Vec<String>,
    },
}

/// Script/text localization commands
#[derive(Subcommand)]
pub enum ScriptCommands {
    /// Export a script/text pair to an exchange JSON document
    Export {
        /// Decrypted script stream
        #[arg(long)]
        script: PathBuf,

        /// Decrypted text pack
        #[arg(long)]
        text: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Source text encoding (sjis or gbk)
        #[arg(long, default_value = "sjis")]
        encoding: TextEncoding,
    },

    /// Rebuild a script/text pair from an edited exchange document
    Rebuild {
        /// Decrypted script stream
        #[arg(long)]
        script: PathBuf,

        /// Decrypted text pack
        #[arg(long)]
        text: PathBuf,

        /// Edited exchange JSON
        #[arg(long)]
        exchange: PathBuf,

        /// Output script file
        #[arg(long)]
        out_script: PathBuf,

        /// Output text pack file
        #[arg(long)]
        out_text: PathBuf,

        /// Source text encoding (sjis or gbk)
        #[arg(long, default_value = "sjis")]
        encoding: TextEncoding,

        /// Target encoding for translated text
        #[arg(long, default_value = "gbk")]
        target: TextEncoding,

        /// Print the consistency report as well
        #[arg(long)]
        report: bool,
    },

    /// Print the reference consistency report for a script/text pair
    Check {
        /// Decrypted script stream
        #[arg(long)]
        script: PathBuf,

        /// Decrypted text pack
        #[arg(long)]
        text: PathBuf,

        /// Source text encoding (sjis or gbk)
        #[arg(long, default_value = "sjis")]
        encoding: TextEncoding,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Pac { command } => command.execute(),
            Commands::Decrypt { source, output } => crypt::decrypt(source, output.as_deref()),
            Commands::Script { command } => command.execute(),
        }
    }
}

impl PacCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            PacCommands::List { source, detailed } => pac::list(source, *detailed),
            PacCommands::Extract {
                source,
                destination,
                file,
            } => pac::extract(source, destination, file),
        }
    }
}

impl ScriptCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            ScriptCommands::Export {
                script,
                text,
                output,
                encoding,
            } => script::export(script, text, output, *encoding),
            ScriptCommands::Rebuild {
                script,
                text,
                exchange,
                out_script,
                out_text,
                encoding,
                target,
                report,
            } => script::rebuild(
                script, text, exchange, out_script, out_text, *encoding, *target, *report,
            ),
            ScriptCommands::Check {
                script,
                text,
                encoding,
            } => script::check(script, text, *encoding),
        }
    }
}
