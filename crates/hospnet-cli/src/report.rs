//! CSV export and human-readable preview of the ranked report.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use hospnet_core::{Coordinate, RankedReport};

const HEADER: [&str; 7] = [
    "Insurance Company",
    "Serial No",
    "Hospital Name",
    "Address",
    "Contact",
    "Distance_km",
    "Coordinates",
];

/// Writes the full ranked report to a timestamped CSV in `output_dir` and
/// returns the file path.
///
/// The filename embeds the report's generation timestamp at second
/// resolution, so repeated runs never collide.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written — the only
/// fatal failure class in the export stage.
pub fn export_csv(report: &RankedReport, output_dir: &Path) -> anyhow::Result<PathBuf> {
    let filename = format!(
        "hospitals_by_distance_{}.csv",
        report.generated_at.format("%Y%m%d_%H%M%S")
    );
    let path = output_dir.join(filename);

    let file = File::create(&path)
        .with_context(|| format!("creating report file {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    write_report(&mut writer, report)
        .with_context(|| format!("writing report rows to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing report file {}", path.display()))?;

    Ok(path)
}

/// Serializes the report to any writer: header row, then one row per record
/// in ranked order. Row content depends only on the records, so exporting
/// the same report twice yields identical bytes.
fn write_report<W: Write>(writer: &mut csv::Writer<W>, report: &RankedReport) -> csv::Result<()> {
    writer.write_record(HEADER)?;
    for record in &report.records {
        writer.write_record([
            record.insurer.as_str(),
            record.serial_no.as_str(),
            record.name.as_str(),
            record.address.as_str(),
            record.contact.as_str(),
            format_distance(record.distance_km).as_str(),
            format_coordinates(record.coordinates).as_str(),
        ])?;
    }
    Ok(())
}

/// Two decimal places for known distances, `inf` for the unknown sentinel.
fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) => format!("{km:.2}"),
        None => "inf".to_owned(),
    }
}

/// `"<lat>, <lon>"` at full precision, or the literal `Not found`.
fn format_coordinates(coordinates: Option<Coordinate>) -> String {
    match coordinates {
        Some(c) => format!("{}, {}", c.latitude, c.longitude),
        None => "Not found".to_owned(),
    }
}

/// Prints the top-N nearest hospitals, excluding unknown-distance records.
pub fn print_nearest(report: &RankedReport, top_n: usize) {
    println!("\nNearest hospitals to your location:");
    for record in report
        .records
        .iter()
        .filter(|r| r.distance_km.is_some())
        .take(top_n)
    {
        println!("\nHospital: {}", record.name);
        println!("Distance: {} km", format_distance(record.distance_km));
        println!("Address: {}", record.address);
        println!("Contact: {}", record.contact);
        println!("Insurance: {}", record.insurer);
    }
}
