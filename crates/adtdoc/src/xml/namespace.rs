//! Namespace URIs and prefix resolution

use indexmap::IndexMap;

use crate::error::ErrorKind;

/// Atom Publishing Protocol
pub const APP: &str = "http://www.w3.org/2007/app";
/// Atom syndication format
pub const ATOM: &str = "http://www.w3.org/2005/Atom";
/// ADT compatibility extensions (template links)
pub const ADT_COMPAT: &str = "http://www.sap.com/adt/compatibility";
/// Namespace bound to the reserved `xml` prefix
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// Split a raw name into prefix and local part
pub fn split_name(raw: &str) -> (Option<&str>, &str) {
    match raw.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, raw),
    }
}

/// Declarations made on a single element; `None` key is the default namespace
type Frame = IndexMap<Option<String>, String>;

/// Stack of in-scope namespace declarations
#[derive(Clone, Debug, Default)]
pub struct Scopes {
    frames: Vec<Frame>,
}

impl Scopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope for an element, recording its `xmlns` attributes
    pub fn push<'a>(&mut self, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) {
        let mut frame = Frame::new();
        for (name, value) in attributes {
            if name == "xmlns" {
                frame.insert(None, value.to_string());
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                frame.insert(Some(prefix.to_string()), value.to_string());
            }
        }
        self.frames.push(frame);
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolve an element prefix to its namespace URI.
    ///
    /// `Ok(None)` means the name is in no namespace. A prefix that is unknown or bound
    /// to the empty string is an error.
    pub fn resolve(&self, prefix: Option<&str>) -> Result<Option<&str>, ErrorKind> {
        match prefix {
            Some("xml") => Ok(Some(XML)),
            Some(prefix) => match self.lookup(Some(prefix)) {
                Some(uri) if !uri.is_empty() => Ok(Some(uri)),
                _ => Err(ErrorKind::UnboundPrefix {
                    prefix: prefix.to_string(),
                }),
            },
            None => Ok(self.lookup(None).filter(|uri| !uri.is_empty())),
        }
    }

    fn lookup(&self, prefix: Option<&str>) -> Option<&str> {
        self.frames.iter().rev().find_map(|frame| {
            frame
                .get(&prefix.map(str::to_string))
                .map(String::as_str)
        })
    }
}
