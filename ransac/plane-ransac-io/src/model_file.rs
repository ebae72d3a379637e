//! Plane model output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use plane_ransac::Model;

use crate::error::IoResult;

/// Write the canonical string of `model`.
///
/// The text is `a\tb\tc\td` with six decimals and no trailing newline.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_model<W: Write>(model: &Model, mut writer: W) -> IoResult<()> {
    writer.write_all(model.to_canonical_string().as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Save the canonical string of `model` to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```no_run
/// use plane_ransac::estimate;
/// use plane_ransac_io::{load_input, save_model};
///
/// let input = load_input("input.txt").unwrap();
/// let model = estimate(&input.points, &input.config()).unwrap();
/// save_model(&model, "output.txt").unwrap();
/// ```
pub fn save_model<P: AsRef<Path>>(model: &Model, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    write_model(model, BufWriter::new(file))
}
