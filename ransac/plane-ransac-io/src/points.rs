//! Tab-separated point file reading and writing.
//!
//! The layout is:
//!
//! ```text
//! 0.01            <- threshold
//! 3               <- declared point count
//! 20\t0\t0        <- one X<TAB>Y<TAB>Z row per point
//! 10\t-10\t0
//! 10\t10\t0
//! ```
//!
//! Numbers use `.` as the decimal separator. Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use plane_ransac::{RansacConfig, Vec3};
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};

/// Contents of a point file.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudInput {
    /// Threshold from the first line.
    pub threshold: f64,
    /// Point count announced on the second line, if present.
    pub declared_count: Option<usize>,
    /// Parsed point rows in file order.
    pub points: Vec<Vec3>,
}

impl PointCloudInput {
    /// Create an input from a threshold and points.
    ///
    /// The declared count is set to the number of points.
    #[must_use]
    pub fn new(threshold: f64, points: Vec<Vec3>) -> Self {
        Self {
            threshold,
            declared_count: Some(points.len()),
            points,
        }
    }

    /// A default configuration carrying this file's threshold.
    #[must_use]
    pub fn config(&self) -> RansacConfig {
        RansacConfig::new().with_threshold(self.threshold)
    }
}

/// Load a point file from disk.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist, and any
/// error [`read_input`] reports for its content.
///
/// # Example
///
/// ```no_run
/// use plane_ransac_io::load_input;
///
/// let input = load_input("input.txt").unwrap();
/// println!("{} points, threshold {}", input.points.len(), input.threshold);
/// ```
pub fn load_input<P: AsRef<Path>>(path: P) -> IoResult<PointCloudInput> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    debug!(path = %path.display(), "Reading point file");
    read_input(BufReader::new(file))
}

/// Parse a point file from a reader.
///
/// A declared count that disagrees with the number of rows is logged and
/// otherwise ignored.
///
/// # Errors
///
/// - [`IoError::MissingThreshold`] for empty input
/// - [`IoError::InvalidContent`] for a malformed threshold, count or row
/// - [`IoError::Io`] if reading fails
pub fn read_input<R: BufRead>(reader: R) -> IoResult<PointCloudInput> {
    let mut threshold = None;
    let mut declared_count = None;
    let mut header_lines = 0;
    let mut points = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        match header_lines {
            0 => {
                threshold = Some(parse_threshold(trimmed, line_number)?);
                header_lines += 1;
            }
            1 => {
                declared_count = Some(parse_count(trimmed, line_number)?);
                header_lines += 1;
            }
            _ => points.push(parse_row(trimmed, line_number)?),
        }
    }

    let threshold = threshold.ok_or(IoError::MissingThreshold)?;

    if let Some(declared) = declared_count.filter(|&d| d != points.len()) {
        warn!(
            declared,
            actual = points.len(),
            "Declared point count does not match rows"
        );
    }

    Ok(PointCloudInput {
        threshold,
        declared_count,
        points,
    })
}

/// Write a point file.
///
/// The count line is the actual number of points.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_input<W: Write>(input: &PointCloudInput, mut writer: W) -> IoResult<()> {
    writeln!(writer, "{}", input.threshold)?;
    writeln!(writer, "{}", input.points.len())?;
    for p in &input.points {
        writeln!(writer, "{}\t{}\t{}", p.x(), p.y(), p.z())?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a point file to disk.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_input<P: AsRef<Path>>(input: &PointCloudInput, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_input(input, BufWriter::new(file))
}

fn parse_threshold(text: &str, line: usize) -> IoResult<f64> {
    text.parse::<f64>()
        .map_err(|e| IoError::invalid_content(line, format!("threshold '{text}': {e}")))
}

fn parse_count(text: &str, line: usize) -> IoResult<usize> {
    text.parse::<usize>()
        .map_err(|e| IoError::invalid_content(line, format!("point count '{text}': {e}")))
}

fn parse_row(text: &str, line: usize) -> IoResult<Vec3> {
    let fields: Vec<&str> = text.split('\t').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(IoError::invalid_content(
            line,
            format!("expected 3 tab-separated fields, got {}", fields.len()),
        ));
    }

    let mut coords = [0.0f32; 3];
    for (coord, field) in coords.iter_mut().zip(&fields) {
        *coord = field
            .parse::<f32>()
            .map_err(|e| IoError::invalid_content(line, format!("coordinate '{field}': {e}")))?;
    }

    Ok(Vec3::from(coords))
}
