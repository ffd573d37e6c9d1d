//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the output site: seeding the global defaults
//! from the optional config file and the `--config` flag, running every
//! source document through the post pipeline ([`crate::post`]), sorting the
//! collected summaries ([`crate::index`]), composing the overview page, and
//! writing the Atom feed when a base URL is configured.

use crate::config::Config;
use crate::context::Context;
use crate::feed::{self, Error as FeedError, FeedConfig};
use crate::index;
use crate::post::{Error as PostError, Pipeline};
use crate::template::{Error as TemplateError, Templates};
use crate::write::{self, Error as WriteError};
use std::fmt;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

/// Builds the site from a [`Config`] object. Documents are processed
/// strictly one at a time in file-name order; the first failure of any kind
/// aborts the whole run.
pub fn build_site(config: &Config) -> Result<()> {
    let templates = Templates::new(&config.layout_directory);

    // Seed the global defaults: config file first (optional), then the
    // inline config string so its pairs win.
    let mut globals = Context::new();
    if config.config_file.exists() {
        let contents = fs::read_to_string(&config.config_file).map_err(|err| Error::ReadGlobals {
            path: config.config_file.clone(),
            err,
        })?;
        globals.parse_block(&contents, "\n");
    }
    globals.parse_block(&config.config_string, ",");

    let pipeline = Pipeline {
        templates: &templates,
        globals: &globals,
        separator: &config.separator,
        base_template: &config.base_template,
        post_template: &config.post_template,
        truncate: config.truncate,
    };

    let mut summaries = Vec::new();
    for file_name in source_files(config)? {
        let path = config.source_directory.join(&file_name);
        let raw = fs::read_to_string(&path)
            .map_err(|err| Error::ReadSource { path, err })?;
        let rendered = pipeline
            .process(&file_name, &raw)
            .map_err(|err| Error::Post { file: file_name, err })?;
        write::write_file(
            &config.output_directory,
            &rendered.file_name,
            rendered.html.as_bytes(),
        )?;
        summaries.push(rendered.summary);
    }

    let summaries = index::sort(summaries);

    let mut context = globals.clone();
    context.insert("Posts", index::to_value(&summaries));
    context.insert("Title", config.overview_title.as_str());
    let html = templates.compose(&config.base_template, &config.overview_template, &mut context)?;
    write::write_file(&config.output_directory, &config.index_file, html.as_bytes())?;

    // Feed links must be absolute, so the feed is only written when the
    // globals provide a base URL.
    if let Some(base_url) = globals.get_str("BaseUrl") {
        let feed_config = FeedConfig {
            title: globals
                .get_str("SiteName")
                .unwrap_or(&config.overview_title)
                .to_owned(),
            author: globals.get_str("Author").map(str::to_owned),
            base_url: base_url.to_owned(),
        };
        let out = File::create(config.output_directory.join("feed.atom"))?;
        feed::write_feed(feed_config, &summaries, out)?;
    }

    Ok(())
}

// Lists the regular files in the source directory, sorted by name for a
// deterministic processing order.
fn source_files(config: &Config) -> Result<Vec<String>> {
    let read_err = |err| Error::ReadSource {
        path: config.source_directory.clone(),
        err,
    };
    let mut file_names = Vec::new();
    for result in fs::read_dir(&config.source_directory).map_err(read_err)? {
        let entry = result.map_err(read_err)?;
        if entry.file_type().map_err(read_err)?.is_file() {
            file_names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    file_names.sort();
    Ok(file_names)
}

/// The result of a fallible site build.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during reading source
/// documents, processing them, templating, writing output files, and feed
/// generation.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors processing a single document.
    Post { file: String, err: PostError },

    /// Returned for errors composing the overview page.
    Template(TemplateError),

    /// Returned for errors persisting output files.
    Write(WriteError),

    /// Returned for errors writing the feed.
    Feed(FeedError),

    /// Returned for I/O problems reading the source directory or a source
    /// document.
    ReadSource { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems reading the global config file.
    ReadGlobals { path: PathBuf, err: std::io::Error },

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Post { file, err } => write!(f, "Processing document '{}': {}", file, err),
            Error::Template(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Feed(err) => err.fmt(f),
            Error::ReadSource { path, err } => {
                write!(f, "Reading source '{}': {}", path.display(), err)
            }
            Error::ReadGlobals { path, err } => {
                write!(f, "Reading config file '{}': {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Post { file: _, err } => Some(err),
            Error::Template(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::ReadSource { path: _, err } => Some(err),
            Error::ReadGlobals { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<TemplateError> for Error {
    /// Converts [`TemplateError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: TemplateError) -> Error {
        Error::Template(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<FeedError> for Error {
    /// Converts [`FeedError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: FeedError) -> Error {
        Error::Feed(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
