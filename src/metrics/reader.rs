//! sysfs-backed sample reader.

use crate::metrics::traits::SampleReader;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Largest file accepted as a runtime value. sysfs counters are a few dozen
/// bytes; anything longer is not one.
pub const MAX_SAMPLE_BYTES: u64 = 64;

/// Reads the NPU's cumulative runtime from a sysfs text file.
#[derive(Debug)]
pub struct SysfsReader {
    path: PathBuf,
    // Last observed availability, used only to log transitions once.
    available: AtomicBool,
}

impl Default for SysfsReader {
    fn default() -> Self {
        Self::new(crate::DEFAULT_RUNTIME_PATH)
    }
}

impl SysfsReader {
    /// Create a reader for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            available: AtomicBool::new(true),
        }
    }

    /// The file this reader samples.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> io::Result<String> {
        let mut contents = String::new();
        File::open(&self.path)?
            .take(MAX_SAMPLE_BYTES + 1)
            .read_to_string(&mut contents)?;

        if contents.len() as u64 > MAX_SAMPLE_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("more than {} bytes", MAX_SAMPLE_BYTES),
            ));
        }
        Ok(contents)
    }

    fn note_availability(&self, available: bool) {
        let was_available = self.available.swap(available, Ordering::Relaxed);
        match (was_available, available) {
            (true, false) => warn!(
                "NPU runtime counter at {} is unavailable, reporting zero activity",
                self.path.display()
            ),
            (false, true) => info!("NPU runtime counter at {} is readable again", self.path.display()),
            _ => {}
        }
    }
}

/// Parse a cumulative runtime value from sysfs text.
///
/// Surrounding whitespace is ignored. Non-finite and negative values are
/// rejected along with anything that is not a number.
pub fn parse_runtime(contents: &str) -> Option<f64> {
    let value = contents.trim().parse::<f64>().ok()?;
    // A negative count is rejected here rather than passed on for the delta
    // clamp to absorb, so the sample after it is measured against 0.0
    // instead of against the negative value.
    (value.is_finite() && value >= 0.0).then_some(value)
}

impl SampleReader for SysfsReader {
    fn read(&self) -> Option<f64> {
        let value = match self.read_contents() {
            Ok(contents) => {
                let parsed = parse_runtime(&contents);
                if parsed.is_none() {
                    debug!("Unparsable runtime value in {}: {:?}", self.path.display(), contents.trim());
                }
                parsed
            }
            Err(e) => {
                debug!("Failed to read {}: {}", self.path.display(), e);
                None
            }
        };

        self.note_availability(value.is_some());
        value
    }
}
