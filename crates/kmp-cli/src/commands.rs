//! Subcommand implementations

use anyhow::{Context, Result, bail};
use kmp_formats::course::{from_workbook, to_workbook};
use kmp_formats::sheet::{WorkbookReader, write_to_file};
use kmp_formats::{KmpFile, decode, encode};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Refuse to clobber an existing file unless asked to
fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!(
            "{} already exists (pass --overwrite to replace it)",
            path.display()
        );
    }
    Ok(())
}

/// KMP file to sheet workbook
pub fn dump(input: &Path, output: &Path, overwrite: bool) -> Result<()> {
    ensure_writable(output, overwrite)?;

    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let course = decode(&data).with_context(|| format!("decoding {}", input.display()))?;
    let workbook = to_workbook(&course)?;

    write_to_file(output, &workbook).with_context(|| format!("writing {}", output.display()))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        sheets = workbook.sheets().len(),
        "dumped course"
    );
    Ok(())
}

/// Sheet workbook to KMP file
pub fn build(input: &Path, output: &Path, overwrite: bool) -> Result<()> {
    ensure_writable(output, overwrite)?;

    let workbook = WorkbookReader::from_path(input)
        .with_context(|| format!("opening {}", input.display()))?
        .read_workbook()
        .with_context(|| format!("parsing {}", input.display()))?;
    let course = from_workbook(&workbook).with_context(|| format!("reading {}", input.display()))?;
    let data = encode(&course).context("encoding course")?;

    std::fs::write(output, &data).with_context(|| format!("writing {}", output.display()))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        bytes = data.len(),
        "built course"
    );
    Ok(())
}

/// Print the container layout of a KMP file
pub fn inspect(input: &Path, json: bool, out: &mut impl Write) -> Result<()> {
    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let file = KmpFile::parse(&data).with_context(|| format!("parsing {}", input.display()))?;
    let summary = file.summary();

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "magic:          {}", summary.magic)?;
    writeln!(out, "file length:    {}", summary.file_length)?;
    writeln!(out, "sections:       {}", summary.section_count)?;
    writeln!(out, "header length:  {}", summary.header_length)?;
    writeln!(out, "version:        {}", summary.version)?;
    writeln!(out)?;
    writeln!(out, "{:<6}{:>10}{:>10}", "tag", "offset", "entries")?;
    for section in &summary.sections {
        writeln!(
            out,
            "{:<6}{:>10}{:>10}",
            section.tag.as_str(),
            format!("0x{:X}", section.offset),
            section.entries
        )?;
    }
    Ok(())
}
