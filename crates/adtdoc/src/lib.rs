//! adtdoc - ADT discovery service document to markdown
//!
//! Reads an Atom Publishing Protocol service document and lists its workspaces,
//! collections and operation templates as markdown.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), adtdoc::Error> {
//! let xml = r#"<app:service xmlns:app="http://www.w3.org/2007/app"
//!                           xmlns:atom="http://www.w3.org/2005/Atom">
//!   <app:workspace>
//!     <atom:title>Core Data</atom:title>
//!     <app:collection href="/sap/bc/adt/repository">
//!       <atom:title>Repositories</atom:title>
//!     </app:collection>
//!   </app:workspace>
//! </app:service>"#;
//!
//! let markdown = adtdoc::render_str(xml)?;
//! assert!(markdown.starts_with("# ADT Endpoints\n\n## Core Data\n"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{ConversionError, Error, ErrorCategory, ErrorKind, Pos, Result, Span};

pub mod input;
pub use input::Input;

pub mod xml;
pub use xml::{
    Config as XmlConfig, Document as XmlDocument, Element as XmlElement, Parser as XmlParser,
    QName,
};

pub mod catalog;
pub use catalog::{Collection, ServiceDocument, TemplateLink, Workspace};

pub mod markdown;
pub use markdown::{AbsentValue, Config, MarkdownWriter};

pub mod convert;
pub use convert::{convert, convert_with_config, render_str, render_str_with_config};

/// Parse a service document from string
pub fn from_xml_str(s: &str) -> Result<ServiceDocument> {
    from_xml_bytes(s.as_bytes())
}

/// Parse a service document from bytes
pub fn from_xml_bytes(bytes: &[u8]) -> Result<ServiceDocument> {
    let input = Input::from_bytes(bytes);
    let document = XmlParser::new(input.as_bytes()).parse()?;
    Ok(ServiceDocument::from_xml(&document))
}
