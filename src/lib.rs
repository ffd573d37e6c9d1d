//! The library code for the `stela` static site generator. The architecture
//! can be generally broken down into three distinct steps:
//!
//! 1. Seeding the global render defaults from the optional config file and
//!    the inline config string ([`crate::context`])
//! 2. Running every source document through the post pipeline
//!    ([`crate::post`]): split front-matter from body, overlay the
//!    front-matter onto the global defaults, render the body to HTML, and
//!    compose the base layout around the content layout ([`crate::template`])
//! 3. Sorting the collected summaries by publish date ([`crate::index`]) and
//!    composing the overview page
//!
//! Every page is produced by the same two-pass composition: the content
//! layout renders first, its output is stored into the render context under
//! `Content`, and the base layout renders around it. The pipeline is
//! strictly sequential and fail-fast: the first I/O, parse, or template
//! error aborts the whole run.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod context;
pub mod feed;
pub mod index;
pub mod markdown;
pub mod post;
pub mod template;
pub mod truncate;
pub mod util;
pub mod write;
