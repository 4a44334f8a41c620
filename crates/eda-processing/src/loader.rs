//! CSV loading with configurable separator and encoding.
//!
//! Bytes are decoded with `encoding_rs` first and the UTF-8 text is handed
//! to the polars CSV reader with full-file schema inference, so a late
//! non-numeric value never aborts the read.

use crate::config::LoadOptions;
use crate::error::{EdaError, Result, ResultExt};
use encoding_rs::Encoding;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Load a delimited file from disk.
pub fn load_csv(path: impl AsRef<Path>, options: &LoadOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(EdaError::FileNotFound(path.to_path_buf()));
    }

    info!("Loading dataset from: {}", path.display());
    let bytes =
        std::fs::read(path).context(format!("Failed to read '{}'", path.display()))?;

    let df = load_csv_from_bytes(&bytes, options)?;
    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Load delimited text that is already in memory (e.g. an HTTP upload).
pub fn load_csv_from_bytes(bytes: &[u8], options: &LoadOptions) -> Result<DataFrame> {
    let text = decode(bytes, &options.encoding)?;
    if text.trim().is_empty() {
        return Err(EdaError::InvalidCsv("no columns to parse from input".to_string()));
    }

    debug!(
        "Parsing {} bytes with separator {:?}",
        text.len(),
        options.separator as char
    );

    let cursor = Cursor::new(text.into_owned().into_bytes());
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(options.separator)
                .with_quote_char(Some(b'"')),
        )
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| EdaError::InvalidCsv(e.to_string()))
}

fn decode<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        EdaError::InvalidParameter(format!("unknown encoding '{}'", label))
    })?;

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(EdaError::InvalidCsv(format!(
            "input is not valid {} text",
            used.name()
        )));
    }
    Ok(text)
}
