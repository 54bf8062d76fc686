//! XML reader: cursor, tree model, namespace resolution and parser

pub mod cursor;
pub mod model;
pub mod namespace;
pub mod parser;

pub use cursor::Cursor;
pub use model::{Content, Document, Element, QName};
pub use parser::{Config, Parser};
