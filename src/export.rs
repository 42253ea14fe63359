//! CSV and YAML export of session results.

use std::io::Write;

use serde::Serialize;

use crate::{
    session::{SessionReport, SessionSummary},
    Result,
};

#[derive(Debug, Serialize)]
struct AngleRow {
    frame: usize,
    left_angle: Option<f64>,
    right_angle: Option<f64>,
    left_angle_smoothed: Option<f64>,
    right_angle_smoothed: Option<f64>,
}

/// Write one CSV row per frame with raw and smoothed angles.
/// Missing values are written as empty cells.
pub fn write_angles_csv<W: Write>(writer: W, report: &SessionReport) -> Result<()> {
    let left = &report.limbs.left;
    let right = &report.limbs.right;
    let left_smoothed = left.smoothed.values();
    let right_smoothed = right.smoothed.values();

    let mut csv_writer = csv::Writer::from_writer(writer);
    for frame in 0..report.frames {
        csv_writer.serialize(AngleRow {
            frame,
            left_angle: left.raw.get(frame).copied().flatten(),
            right_angle: right.raw.get(frame).copied().flatten(),
            left_angle_smoothed: left_smoothed.and_then(|s| s.get(frame).copied()),
            right_angle_smoothed: right_smoothed.and_then(|s| s.get(frame).copied()),
        })?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Write the session summary as YAML
pub fn write_summary_yaml<W: Write>(writer: W, summary: &SessionSummary) -> Result<()> {
    serde_yaml::to_writer(writer, summary)?;
    Ok(())
}
