//! CLI commands for PAC archive operations

use std::path::Path;

use crate::pac::PacArchive;

/// List archive contents
pub fn list(source: &Path, detailed: bool) -> anyhow::Result<()> {
    let pac = PacArchive::open(source)?;

    for (i, entry) in pac.entries().iter().enumerate() {
        if detailed {
            println!(
                "{i:4}  {:<32}  {:>10} bytes @ {}",
                entry.name, entry.size, entry.offset
            );
        } else {
            println!("{i} {}", entry.name);
        }
    }
    println!("\n{} files", pac.len());

    Ok(())
}

/// Extract files into a directory; everything when `names` is empty
pub fn extract(source: &Path, destination: &Path, names: &[String]) -> anyhow::Result<()> {
    let mut pac = PacArchive::open(source)?;

    if names.is_empty() {
        pac.extract_all(destination)?;
        println!("Extracted {} files to {}", pac.len(), destination.display());
    } else {
        pac.extract_to(destination, names)?;
        println!(
            "Extracted {} files to {}",
            names.len(),
            destination.display()
        );
    }

    Ok(())
}
