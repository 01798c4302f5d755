//! CLI commands for script/text localization

use std::fs;
use std::path::Path;

use crate::exchange;
use crate::relocate::Relocator;
use crate::text::TextEncoding;

fn open_session(script: &Path, text: &Path, encoding: TextEncoding) -> anyhow::Result<Relocator> {
    let script_bytes = fs::read(script)?;
    let text_bytes = fs::read(text)?;
    Ok(Relocator::new(script_bytes, &text_bytes, encoding)?)
}

/// Export the script/text pair to an exchange document
pub fn export(
    script: &Path,
    text: &Path,
    output: &Path,
    encoding: TextEncoding,
) -> anyhow::Result<()> {
    let session = open_session(script, text, encoding)?;
    let doc = session.export()?;
    exchange::write_exchange(output, &doc)?;

    println!("Exported {} entries to {}", doc.len(), output.display());
    Ok(())
}

/// Rebuild both artifacts from an edited exchange document
pub fn rebuild(
    script: &Path,
    text: &Path,
    exchange_path: &Path,
    out_script: &Path,
    out_text: &Path,
    encoding: TextEncoding,
    target: TextEncoding,
    report: bool,
) -> anyhow::Result<()> {
    let mut session = open_session(script, text, encoding)?;
    let doc = exchange::read_exchange(exchange_path)?;

    // The report describes the source pair, so take it before patching.
    let report_text = report.then(|| session.audit().to_string());

    // Nothing is written unless the whole rebuild succeeds.
    let output = session.rebuild(&doc, target)?;
    fs::write(out_script, &output.script)?;
    fs::write(out_text, &output.text)?;

    println!(
        "Patched {} entries: {} ({} bytes), {} ({} bytes)",
        doc.len(),
        out_script.display(),
        output.script.len(),
        out_text.display(),
        output.text.len()
    );
    if let Some(report_text) = report_text {
        println!("\n{report_text}");
    }
    Ok(())
}

/// Print the reference consistency report
pub fn check(script: &Path, text: &Path, encoding: TextEncoding) -> anyhow::Result<()> {
    let session = open_session(script, text, encoding)?;
    println!("{}", session.audit());
    Ok(())
}
