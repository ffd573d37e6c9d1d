//! The per-document pipeline: split front-matter from body, overlay the
//! front-matter onto the global defaults, render the body to HTML, resolve
//! the content layout (honoring a per-post `Layout` override), and compose
//! the final page. Each document must contain the configured separator token
//! exactly once; everything before it is front-matter, everything after it
//! is the body.

use crate::context::Context;
use crate::markdown;
use crate::template::{self, Templates};
use crate::truncate::truncate;
use crate::util::change_extension;
use gtmpl::Value;
use std::collections::HashMap;
use std::fmt;

/// The lightweight record kept per document for the index page and the
/// feed: title, publish date, author, truncated abstract, and the output
/// filename the document was rendered to.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub title: String,
    pub published: String,
    pub author: String,
    pub excerpt: String,
    pub filename: String,
}

impl From<&Summary> for Value {
    /// Converts [`Summary`]s into [`Value`]s for templating. The keys match
    /// the front-matter vocabulary, so the overview layout ranges over
    /// `Posts` and references `.Title`, `.Published`, `.Author`,
    /// `.Abstract`, and `.Filename`.
    fn from(s: &Summary) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("Title".to_owned(), (&s.title).into());
        m.insert("Published".to_owned(), (&s.published).into());
        m.insert("Author".to_owned(), (&s.author).into());
        m.insert("Abstract".to_owned(), (&s.excerpt).into());
        m.insert("Filename".to_owned(), (&s.filename).into());
        Value::Object(m)
    }
}

/// One fully processed document: the output filename, the composed HTML,
/// and the summary recorded for the index page. Nothing has touched disk
/// yet; writing is the caller's job.
pub struct RenderedPost {
    pub file_name: String,
    pub html: String,
    pub summary: Summary,
}

/// Processes documents against a fixed set of templates and global
/// defaults.
pub struct Pipeline<'a> {
    /// The template loader for the layout directory.
    pub templates: &'a Templates<'a>,

    /// The immutable global defaults. Each document renders against its own
    /// overlay of these, so front-matter never leaks between documents.
    pub globals: &'a Context,

    /// The token separating front-matter from the body.
    pub separator: &'a str,

    /// The base layout wrapping every page.
    pub base_template: &'a str,

    /// The content layout used when a document declares no `Layout`
    /// override.
    pub post_template: &'a str,

    /// The number of paragraphs to keep in each summary's abstract.
    pub truncate: usize,
}

impl Pipeline<'_> {
    /// Runs one document through the pipeline. `file_name` is the source
    /// file's name (its extension is swapped for `html` to produce the
    /// output name) and `raw` is the full source text. Required front-matter
    /// fields are validated before any rendering, so a malformed document
    /// fails without side effects.
    pub fn process(&self, file_name: &str, raw: &str) -> Result<RenderedPost> {
        let (front, body) = self.split_document(raw)?;

        let mut context = self.globals.clone();
        context.parse_block(front, "\n");

        let post_html = markdown::to_html(body);
        context.insert("Post", post_html.as_str());

        let summary = Summary {
            title: required(&context, "Title")?,
            published: required(&context, "Published")?,
            author: required(&context, "Author")?,
            excerpt: truncate(&post_html, self.truncate).to_owned(),
            filename: change_extension(file_name, "html"),
        };

        // A `Layout` override names an alternate content layout for this
        // document only. Taking it out of the context here is what makes the
        // override one-shot.
        let layout = context.take_str("Layout");
        let content_template = layout.as_deref().unwrap_or(self.post_template);
        let html = self
            .templates
            .compose(self.base_template, content_template, &mut context)?;

        Ok(RenderedPost {
            file_name: summary.filename.clone(),
            html,
            summary,
        })
    }

    fn split_document<'d>(&self, raw: &'d str) -> Result<(&'d str, &'d str)> {
        let mut parts = raw.split(self.separator);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(front), Some(body), None) => Ok((front, body)),
            _ => Err(Error::Format {
                separator: self.separator.to_owned(),
            }),
        }
    }
}

fn required(context: &Context, field: &'static str) -> Result<String> {
    context
        .get_str(field)
        .map(str::to_owned)
        .ok_or(Error::MissingField { field })
}

/// The result of a fallible pipeline operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error processing a single document.
#[derive(Debug)]
pub enum Error {
    /// Returned when the front-matter separator appears zero times or more
    /// than once in a document.
    Format { separator: String },

    /// Returned when a required front-matter field is absent (or not a
    /// string) after merging the document over the global defaults.
    MissingField { field: &'static str },

    /// Returned for errors composing the document's layouts.
    Template(template::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Format { separator } => write!(
                f,
                "front-matter separator `{}` must appear exactly once",
                separator
            ),
            Error::MissingField { field } => {
                write!(f, "missing required front-matter field `{}`", field)
            }
            Error::Template(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Format { .. } => None,
            Error::MissingField { .. } => None,
            Error::Template(err) => Some(err),
        }
    }
}

impl From<template::Error> for Error {
    /// Converts [`template::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator when composing layouts.
    fn from(err: template::Error) -> Error {
        Error::Template(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn layout_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.html"), "<body>{{.Content}}</body>").unwrap();
        std::fs::write(dir.path().join("post.html"), "<article>{{.Post}}</article>").unwrap();
        std::fs::write(dir.path().join("special.html"), "<aside>{{.Post}}</aside>").unwrap();
        dir
    }

    fn pipeline<'a>(templates: &'a Templates<'a>, globals: &'a Context) -> Pipeline<'a> {
        Pipeline {
            templates,
            globals,
            separator: "-----",
            base_template: "base.html",
            post_template: "post.html",
            truncate: 1,
        }
    }

    #[test]
    fn test_process_document() -> Result<()> {
        let dir = layout_dir();
        let templates = Templates::new(dir.path());
        let globals = Context::new();
        let rendered = pipeline(&templates, &globals).process(
            "hello.md",
            "Title: Hello\nPublished: 2024-01-01\nAuthor: A\n-----\nFirst.",
        )?;

        assert_eq!(rendered.file_name, "hello.html");
        assert_eq!(rendered.html, "<body><article><p>First.</p>\n</article></body>");
        assert_eq!(
            rendered.summary,
            Summary {
                title: "Hello".to_owned(),
                published: "2024-01-01".to_owned(),
                author: "A".to_owned(),
                excerpt: "<p>First.</p>".to_owned(),
                filename: "hello.html".to_owned(),
            }
        );
        Ok(())
    }

    #[test]
    fn test_front_matter_overrides_globals() -> Result<()> {
        let dir = layout_dir();
        let templates = Templates::new(dir.path());
        let mut globals = Context::new();
        globals.insert("Author", "Default");
        let p = pipeline(&templates, &globals);

        let rendered =
            p.process("a.md", "Title: A\nPublished: 2024-01-01\nAuthor: Override\n-----\nx")?;
        assert_eq!(rendered.summary.author, "Override");

        // The override was scoped to that document; the next one falls back
        // to the global default.
        let rendered = p.process("b.md", "Title: B\nPublished: 2024-01-02\n-----\nx")?;
        assert_eq!(rendered.summary.author, "Default");
        Ok(())
    }

    #[test]
    fn test_missing_separator() {
        let dir = layout_dir();
        let templates = Templates::new(dir.path());
        let globals = Context::new();
        match pipeline(&templates, &globals).process("a.md", "Title: A\nno separator here") {
            Err(Error::Format { .. }) => {}
            _ => panic!("expected Format error"),
        }
    }

    #[test]
    fn test_duplicated_separator() {
        let dir = layout_dir();
        let templates = Templates::new(dir.path());
        let globals = Context::new();
        match pipeline(&templates, &globals)
            .process("a.md", "Title: A\n-----\nbody\n-----\nmore")
        {
            Err(Error::Format { .. }) => {}
            _ => panic!("expected Format error"),
        }
    }

    #[test]
    fn test_missing_required_field() {
        let dir = layout_dir();
        let templates = Templates::new(dir.path());
        let globals = Context::new();
        match pipeline(&templates, &globals)
            .process("a.md", "Title: A\nPublished: 2024-01-01\n-----\nx")
        {
            Err(Error::MissingField { field: "Author" }) => {}
            other => panic!("expected MissingField for Author, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_layout_override_is_one_shot() -> Result<()> {
        let dir = layout_dir();
        let templates = Templates::new(dir.path());
        let globals = Context::new();
        let p = pipeline(&templates, &globals);

        let first = p.process(
            "a.md",
            "Title: A\nPublished: 2024-01-01\nAuthor: A\nLayout: special.html\n-----\nx",
        )?;
        assert_eq!(first.html, "<body><aside><p>x</p>\n</aside></body>");

        let second = p.process("b.md", "Title: B\nPublished: 2024-01-02\nAuthor: B\n-----\nx")?;
        assert_eq!(second.html, "<body><article><p>x</p>\n</article></body>");
        Ok(())
    }
}
