//! Markdown rendering of a service catalog

use std::io::{self, Write};

use crate::catalog::{Collection, ServiceDocument, TemplateLink, Workspace};

/// Rendering of a missing `href`, `rel` or `template` attribute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AbsentValue {
    /// The literal text `None`
    #[default]
    NoneLiteral,
    /// Nothing at all
    Empty,
}

impl AbsentValue {
    fn render(self, value: Option<&str>) -> &str {
        match (value, self) {
            (Some(value), _) => value,
            (None, Self::NoneLiteral) => "None",
            (None, Self::Empty) => "",
        }
    }
}

/// Rendering options
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Text of the top-level heading
    pub heading: String,
    pub absent: AbsentValue,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            heading: "ADT Endpoints".to_string(),
            absent: AbsentValue::default(),
        }
    }
}

impl Config {
    pub fn with_absent(mut self, absent: AbsentValue) -> Self {
        self.absent = absent;
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }
}

/// Streams a [`ServiceDocument`] as markdown into any writer
#[derive(Debug)]
pub struct MarkdownWriter<'c, W> {
    out: W,
    config: &'c Config,
}

impl<'c, W: Write> MarkdownWriter<'c, W> {
    pub fn new(out: W, config: &'c Config) -> Self {
        Self { out, config }
    }

    /// Write the whole document
    pub fn write_document(&mut self, document: &ServiceDocument) -> io::Result<()> {
        writeln!(self.out, "# {}\n", self.config.heading)?;
        for workspace in &document.workspaces {
            self.write_workspace(workspace)?;
        }
        Ok(())
    }

    fn write_workspace(&mut self, workspace: &Workspace) -> io::Result<()> {
        if let Some(title) = &workspace.title {
            writeln!(self.out, "## {title}\n")?;
        }
        for collection in &workspace.collections {
            self.write_collection(collection)?;
        }
        Ok(())
    }

    fn write_collection(&mut self, collection: &Collection) -> io::Result<()> {
        if let Some(title) = &collection.title {
            writeln!(self.out, "### {title}\n")?;
        }
        let href = self.config.absent.render(collection.href.as_deref());
        writeln!(self.out, "- **URL**: `{href}`")?;

        let operations = collection.operations();
        if !operations.is_empty() {
            writeln!(self.out, "- **Operations**:")?;
            for link in operations {
                self.write_operation(link)?;
            }
        }
        writeln!(self.out)
    }

    fn write_operation(&mut self, link: &TemplateLink) -> io::Result<()> {
        let absent = self.config.absent;
        writeln!(self.out, "  - **{}**", absent.render(link.rel.as_deref()))?;
        writeln!(
            self.out,
            "    - `template`: `{}`",
            absent.render(link.template.as_deref())
        )
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Render a catalog to a string
pub fn to_string(document: &ServiceDocument, config: &Config) -> String {
    let mut writer = MarkdownWriter::new(Vec::new(), config);
    // writes into a Vec cannot fail
    let bytes = writer
        .write_document(document)
        .and_then(|()| writer.finish())
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
