//! Service document to markdown conversion

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use tracing::{debug, instrument};

use crate::catalog::ServiceDocument;
use crate::error::{ConversionError, Result};
use crate::input::Input;
use crate::markdown::{self, Config, MarkdownWriter};
use crate::xml::{Document, Parser};

/// Convert the service document at `input` into a markdown file at `output`
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> std::result::Result<(), ConversionError> {
    convert_with_config(input, output, &Config::default())
}

/// Convert with explicit rendering options.
///
/// The input is fully parsed before `output` is created, so a parse failure leaves any
/// existing output untouched. A write failure may leave a truncated file behind.
pub fn convert_with_config(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &Config,
) -> std::result::Result<(), ConversionError> {
    convert_file(input.as_ref(), output.as_ref(), config)
}

#[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
fn convert_file(
    input: &Path,
    output: &Path,
    config: &Config,
) -> std::result::Result<(), ConversionError> {
    let bytes = fs::read(input).map_err(|source| ConversionError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let filename = input.to_string_lossy();
    let source = Input::from_bytes(&bytes).with_filename(&filename);
    let document = parse(&source).map_err(|source| ConversionError::Parse {
        path: input.to_path_buf(),
        source,
    })?;

    let catalog = ServiceDocument::from_xml(&document);
    debug!(
        workspaces = catalog.workspaces.len(),
        collections = catalog.collection_count(),
        "catalog extracted"
    );

    let write_error = |source| ConversionError::Write {
        path: output.to_path_buf(),
        source,
    };
    let file = File::create(output).map_err(write_error)?;
    let mut writer = MarkdownWriter::new(BufWriter::new(file), config);
    writer.write_document(&catalog).map_err(write_error)?;
    writer.finish().map_err(write_error)?;

    debug!("markdown written");
    Ok(())
}

/// Render an in-memory service document as markdown
pub fn render_str(xml: &str) -> Result<String> {
    render_str_with_config(xml, &Config::default())
}

pub fn render_str_with_config(xml: &str, config: &Config) -> Result<String> {
    let document = parse(&Input::from_str(xml))?;
    let catalog = ServiceDocument::from_xml(&document);
    Ok(markdown::to_string(&catalog, config))
}

fn parse(input: &Input<'_>) -> Result<Document> {
    debug!(
        filename = input.filename().unwrap_or("<memory>"),
        bytes = input.len(),
        "parsing service document"
    );
    Parser::new(input.as_bytes()).parse()
}
