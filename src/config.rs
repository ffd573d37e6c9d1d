//! The run configuration: directories, template names, and the handful of
//! knobs the pipeline needs. Built from the command-line arguments; the
//! defaults mirror a conventional `posts/` + `layouts/` + `output/` project
//! rooted at the working directory.

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use std::path::PathBuf;

pub struct Config {
    /// The directory containing document source files.
    pub source_directory: PathBuf,

    /// The directory all rendered pages are written into, flat.
    pub output_directory: PathBuf,

    /// The directory containing layout templates.
    pub layout_directory: PathBuf,

    /// The base layout wrapping every page.
    pub base_template: String,

    /// The default content layout for posts.
    pub post_template: String,

    /// The content layout for the overview page.
    pub overview_template: String,

    /// The output filename of the overview page.
    pub index_file: String,

    /// The `Title` value the overview page renders with.
    pub overview_title: String,

    /// The number of paragraphs kept in each post's abstract.
    pub truncate: usize,

    /// The token separating front-matter from the body.
    pub separator: String,

    /// Comma-separated `key: value` pairs applied over the config file.
    pub config_string: String,

    /// An optional file of newline-separated `key: value` pairs seeding the
    /// global defaults.
    pub config_file: PathBuf,
}

impl Config {
    /// Builds a [`Config`] from parsed command-line arguments. Every flag
    /// has a default, so this only fails for a non-numeric `--truncate`.
    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let value = |name: &str| matches.value_of(name).unwrap_or_default().to_owned();
        let truncate = matches.value_of("truncate").unwrap_or("1");
        Ok(Config {
            source_directory: PathBuf::from(value("source")),
            output_directory: PathBuf::from(value("output")),
            layout_directory: PathBuf::from(value("layouts")),
            base_template: value("template"),
            post_template: value("post"),
            overview_template: value("overview"),
            index_file: value("index"),
            overview_title: value("overview-title"),
            truncate: truncate
                .parse()
                .map_err(|e| anyhow!("Invalid --truncate value `{}`: {}", truncate, e))?,
            separator: value("separator"),
            config_string: value("config"),
            config_file: PathBuf::from(value("config-file")),
        })
    }
}
