//! Opens the ride data file, decompressing `.gz` input on the fly.

use crate::error::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Opens `path` for reading. Files ending in `.gz` are gzip-decoded.
pub fn open_source(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
    debug!(path = %path.display(), gzipped, "Opening ride data source");

    if gzipped {
        Ok(Box::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
