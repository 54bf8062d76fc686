//! Typed view of an ADT discovery service document
//!
//! Extraction walks a fixed hierarchy of direct children:
//! `app:workspace` > `app:collection` > `compat:templateLinks` > `compat:templateLink`.
//! Document order is kept at every level and nothing is deduplicated.

use tracing::warn;

use crate::xml::namespace::{ADT_COMPAT, APP, ATOM};
use crate::xml::{Document, Element};

/// Catalog of workspaces found under the document root
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceDocument {
    pub workspaces: Vec<Workspace>,
}

/// Named grouping of collections
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workspace {
    pub title: Option<String>,
    pub collections: Vec<Collection>,
}

/// API endpoint entry
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collection {
    pub title: Option<String>,
    pub href: Option<String>,
    /// `None` when the collection has no `templateLinks` container
    pub template_links: Option<Vec<TemplateLink>>,
}

/// Operation on a collection, described by a URL template
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateLink {
    pub rel: Option<String>,
    pub template: Option<String>,
}

impl ServiceDocument {
    pub fn from_xml(document: &Document) -> Self {
        let workspaces = document
            .root
            .find_all(APP, "workspace")
            .map(Workspace::from_element)
            .collect();
        Self { workspaces }
    }

    pub fn collection_count(&self) -> usize {
        self.workspaces.iter().map(|w| w.collections.len()).sum()
    }
}

impl Workspace {
    fn from_element(element: &Element) -> Self {
        // an untitled workspace still contributes its collections
        Self {
            title: title_of(element),
            collections: element
                .find_all(APP, "collection")
                .map(Collection::from_element)
                .collect(),
        }
    }
}

impl Collection {
    fn from_element(element: &Element) -> Self {
        let href = element.attribute("href").map(str::to_string);
        if href.is_none() {
            warn!(title = ?title_of(element), "collection without href");
        }

        Self {
            title: title_of(element),
            href,
            template_links: element.find(ADT_COMPAT, "templateLinks").map(|links| {
                links
                    .find_all(ADT_COMPAT, "templateLink")
                    .map(TemplateLink::from_element)
                    .collect()
            }),
        }
    }

    /// Template links to list as operations; empty when there are none
    pub fn operations(&self) -> &[TemplateLink] {
        self.template_links.as_deref().unwrap_or_default()
    }
}

impl TemplateLink {
    fn from_element(element: &Element) -> Self {
        Self {
            rel: element.attribute("rel").map(str::to_string),
            template: element.attribute("template").map(str::to_string),
        }
    }
}

/// Text of the first `atom:title` child, if it has any
fn title_of(element: &Element) -> Option<String> {
    element.find(ATOM, "title").and_then(Element::text)
}
