//! Loads layout templates from the layout directory and renders them against
//! a [`Context`]. The two-pass [`Templates::compose`] is how every page is
//! produced: the content layout renders first and its output is stored into
//! the context under `Content`, then the base layout renders with the
//! augmented context. The base layout treats `Content` as a pre-rendered
//! HTML fragment; templates are plain text, so nothing is escaped.

use crate::context::Context;
use gtmpl::{Context as TemplateContext, Template};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Renders named templates out of a layout directory.
pub struct Templates<'a> {
    layout_directory: &'a Path,
}

impl<'a> Templates<'a> {
    pub fn new(layout_directory: &'a Path) -> Templates<'a> {
        Templates { layout_directory }
    }

    /// Loads `{layout_directory}/{name}`, substitutes every reference with
    /// the corresponding `context` value, and returns the rendered output.
    /// A missing template file, an unparseable template, and a reference the
    /// engine cannot resolve are all errors.
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        let path = self.layout_directory.join(name);
        let mut contents = String::new();
        File::open(&path)
            .and_then(|mut f| f.read_to_string(&mut contents))
            .map_err(|err| Error::Open {
                path: path.clone(),
                err,
            })?;

        let mut template = Template::default();
        template.parse(&contents).map_err(Error::Parse)?;

        let context =
            TemplateContext::from(context.to_value()).map_err(|err| Error::Render(err.to_string()))?;
        let mut buf = Vec::new();
        template.execute(&mut buf, &context).map_err(Error::Render)?;
        String::from_utf8(buf).map_err(|_| Error::Render(format!("template `{}` produced invalid UTF-8", name)))
    }

    /// Renders the content layout, stores the result into `context` under
    /// `Content`, then renders the base layout. The content render must
    /// complete before the base render begins; the base layout would
    /// otherwise see a stale or absent `Content` value. Both outputs are
    /// snapshots: mutating `context` afterwards does not alter them.
    pub fn compose(
        &self,
        base_name: &str,
        content_name: &str,
        context: &mut Context,
    ) -> Result<String> {
        let content = self.render(content_name, context)?;
        context.insert("Content", content);
        self.render(base_name, context)
    }
}

/// The result of a fallible template operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error locating, parsing, or rendering a template.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening template files.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    Parse(String),

    /// Returned for errors substituting values into a template.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Open { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::Parse(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { path: _, err } => Some(err),
            Error::Parse(_) => None,
            Error::Render(_) => None,
        }
    }
}
