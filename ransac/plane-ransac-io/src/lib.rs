//! Point file I/O for plane-ransac.
//!
//! This crate reads the tab-separated point files consumed by the
//! `plane-ransac` command and writes fitted models back out:
//!
//! - [`load_input`] / [`read_input`] - threshold, declared count and point rows
//! - [`save_input`] / [`write_input`] - the same layout, for generated clouds
//! - [`save_model`] / [`write_model`] - the canonical `a\tb\tc\td` model line
//!
//! # Example
//!
//! ```no_run
//! use plane_ransac::estimate;
//! use plane_ransac_io::{load_input, save_model};
//!
//! let input = load_input("input.txt").unwrap();
//! let model = estimate(&input.points, &input.config()).unwrap();
//! save_model(&model, "output.txt").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod model_file;
mod points;

pub use error::{IoError, IoResult};
pub use model_file::{save_model, write_model};
pub use points::{PointCloudInput, load_input, read_input, save_input, write_input};
