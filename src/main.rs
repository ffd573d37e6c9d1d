use clap::{App, Arg};
use stela::build::build_site;
use stela::config::Config;

fn app() -> App<'static, 'static> {
    App::new("stela")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates a static blog from markdown documents with colon-separated front-matter")
        .arg(
            Arg::with_name("source")
                .long("source")
                .value_name("DIR")
                .default_value("posts")
                .help("The directory containing document source files"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("DIR")
                .default_value("output")
                .help("The directory generated HTML is written into"),
        )
        .arg(
            Arg::with_name("layouts")
                .long("layouts")
                .value_name("DIR")
                .default_value("layouts")
                .help("The directory containing layout template files"),
        )
        .arg(
            Arg::with_name("template")
                .long("template")
                .value_name("FILE")
                .default_value("base.html")
                .help("The base layout wrapping every page"),
        )
        .arg(
            Arg::with_name("post")
                .long("post")
                .value_name("FILE")
                .default_value("post.html")
                .help("The default content layout for posts"),
        )
        .arg(
            Arg::with_name("overview")
                .long("overview")
                .value_name("FILE")
                .default_value("overview.html")
                .help("The content layout for the overview page"),
        )
        .arg(
            Arg::with_name("index")
                .long("index")
                .value_name("FILE")
                .default_value("index.html")
                .help("The output filename of the overview page"),
        )
        .arg(
            Arg::with_name("overview-title")
                .long("overview-title")
                .value_name("TITLE")
                .default_value("Index")
                .help("The title rendered on the overview page"),
        )
        .arg(
            Arg::with_name("truncate")
                .long("truncate")
                .value_name("N")
                .default_value("1")
                .help("Number of paragraphs to keep in each post's abstract"),
        )
        .arg(
            Arg::with_name("separator")
                .long("separator")
                .value_name("TOKEN")
                .default_value("-----")
                .help("The token separating front-matter from the body"),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("PAIRS")
                .default_value("")
                .help("Comma-separated `key: value` pairs available to every template"),
        )
        .arg(
            Arg::with_name("config-file")
                .long("config-file")
                .value_name("FILE")
                .default_value("variables.conf")
                .help("Newline-separated `key: value` file of global template variables"),
        )
}

fn main() {
    let matches = app().get_matches();
    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("stela: {}", err);
            std::process::exit(1);
        }
    };
    if let Err(err) = build_site(&config) {
        eprintln!("stela: {}", err);
        std::process::exit(1);
    }
}
