//! XML data model

use indexmap::IndexMap;

/// XML document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// Namespace-resolved element name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.into(),
        }
    }

    /// Check whether this name is `{namespace}local`
    pub fn matches(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

/// XML element
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Name as written in the source, prefix included
    pub raw_name: String,
    pub name: QName,
    /// Attributes keyed by their name as written in the source
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Direct children named `{namespace}local`, in document order
    pub fn find_all<'s>(
        &'s self,
        namespace: &'s str,
        local: &'s str,
    ) -> impl Iterator<Item = &'s Self> + 's {
        self.elements()
            .filter(move |element| element.name.matches(namespace, local))
    }

    /// First direct child named `{namespace}local`
    pub fn find(&self, namespace: &str, local: &str) -> Option<&Self> {
        self.elements()
            .find(|element| element.name.matches(namespace, local))
    }

    /// Value of an unprefixed attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Concatenated direct text content, `None` when there is none
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|child| match child {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect();
        (!text.is_empty()).then_some(text)
    }
}
