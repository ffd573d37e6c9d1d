//! Support for creating an Atom feed from the sorted post summaries. The
//! feed is only produced when the site's base URL is configured, since entry
//! links must be absolute.

use crate::index::parse_published;
use crate::post::Summary;
use atom_syndication::{Entry, Error as AtomError, Feed, Link, Person};
use chrono::{FixedOffset, TimeZone, Utc};
use std::fmt;
use std::io::Write;
use url::Url;

/// Bundled configuration for creating a feed.
pub struct FeedConfig {
    /// The feed title.
    pub title: String,

    /// The feed-level author, if one is configured globally.
    pub author: Option<String>,

    /// The site's base URL. Entry links join this with each summary's
    /// output filename.
    pub base_url: String,
}

/// Creates a feed from some configuration ([`FeedConfig`]) and a list of
/// sorted [`Summary`]s and writes the result to a [`std::io::Write`]. This
/// function takes ownership of the provided [`FeedConfig`].
pub fn write_feed<W: Write>(config: FeedConfig, summaries: &[Summary], w: W) -> Result<()> {
    feed(config, summaries)?.write_to(w)?;
    Ok(())
}

fn feed(config: FeedConfig, summaries: &[Summary]) -> Result<Feed> {
    use std::collections::BTreeMap;
    let base = Url::parse(&config.base_url)?;
    Ok(Feed {
        entries: feed_entries(&base, summaries)?,
        title: config.title.into(),
        id: base.to_string(),
        updated: FixedOffset::east(0).from_utc_datetime(&Utc::now().naive_utc()),
        authors: author_to_people(config.author),
        categories: Vec::new(),
        contributors: Vec::new(),
        generator: None,
        icon: None,
        logo: None,
        rights: None,
        subtitle: None,
        base: None,
        lang: None,
        extensions: BTreeMap::new(),
        namespaces: BTreeMap::new(),
        links: vec![Link {
            href: base.to_string(),
            rel: "alternate".to_string(),
            title: None,
            hreflang: None,
            mime_type: None,
            length: None,
        }],
    })
}

fn feed_entries(base: &Url, summaries: &[Summary]) -> Result<Vec<Entry>> {
    use std::collections::BTreeMap;
    let mut entries: Vec<Entry> = Vec::with_capacity(summaries.len());

    for summary in summaries {
        let url = base.join(&summary.filename)?;
        let date = FixedOffset::east(0).from_utc_datetime(&parse_published(&summary.published));

        entries.push(Entry {
            id: url.to_string(),
            title: summary.title.clone().into(),
            updated: date,
            authors: author_to_people(Some(summary.author.clone())),
            links: vec![Link {
                href: url.to_string(),
                rel: "alternate".to_owned(),
                title: None,
                mime_type: None,
                hreflang: None,
                length: None,
            }],
            rights: None,
            summary: Some(summary.excerpt.clone().into()),
            categories: Vec::new(),
            contributors: Vec::new(),
            published: Some(date),
            source: None,
            content: None,
            extensions: BTreeMap::new(),
        })
    }
    Ok(entries)
}

fn author_to_people(author: Option<String>) -> Vec<Person> {
    match author {
        Some(name) => vec![Person {
            name,
            email: None,
            uri: None,
        }],
        None => Vec::new(),
    }
}

/// The result of a fallible feed operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed. Variants include I/O, Atom, and
/// URL issues.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when there is an Atom-related error.
    Atom(AtomError),

    /// Returned when the base URL is malformed or an entry URL cannot be
    /// joined onto it.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Atom(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Atom(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator in fallible feed operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts [`url::ParseError`]s into [`Error`]. This allows us to use
    /// the `?` operator when joining entry URLs.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}
