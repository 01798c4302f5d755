//! CLI command for file decryption

use std::fs;
use std::path::{Path, PathBuf};

use crate::crypt;

/// Decrypt one file; the default output path appends `.dec`
pub fn decrypt(source: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let data = fs::read(source)?;
    let plain = crypt::decrypt(&data);

    let out_path = output.map_or_else(
        || {
            let mut name = source.as_os_str().to_owned();
            name.push(".dec");
            PathBuf::from(name)
        },
        Path::to_path_buf,
    );
    fs::write(&out_path, plain)?;
    println!("Decrypted {} -> {}", source.display(), out_path.display());

    Ok(())
}
