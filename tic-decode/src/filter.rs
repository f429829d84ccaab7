//! Reads a `#ticfilter` file from disk and hands it to `tic::load_filter`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tic::dialect::Dialect;
use tic::FilterBitmap;

pub fn load<D: Dialect>(path: &Path) -> Result<FilterBitmap> {
    let bytes = fs::read(path).with_context(|| format!("failed to read filter file {}", path.display()))?;
    tic::load_filter::<D>(&bytes).with_context(|| format!("malformed filter file {}", path.display()))
}
