//! Converts a post body from markdown to HTML. The conversion is a pure
//! function of the input text; everything else in the pipeline treats the
//! result as an opaque HTML fragment.

use pulldown_cmark::{html, Options, Parser};

/// Renders `markdown` to an HTML string.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}
