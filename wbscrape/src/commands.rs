use clap::{arg, command};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("wbscrape")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wbscrape")
        .about("Export Wildberries category or search listings, with sales counts, to xlsx")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-o --"output-dir" <PATH>)
                .required(false)
                .help("Directory the spreadsheet is written to")
                .default_value(".")
                .global(true),
        )
        .arg(
            arg!(--"cache-file" <PATH>)
                .required(false)
                .help("Location of the cached catalog (default: <output-dir>/catalog.json)")
                .global(true),
        )
        .arg(
            arg!(--"connect-timeout" <SECONDS>)
                .required(false)
                .help("Seconds to wait for a connection; sales lookups that hit it are exported as \"no data\"")
                .value_parser(clap::value_parser!(u64))
                .default_value("5")
                .global(true),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Overall limit per request in seconds (default: none)")
                .value_parser(clap::value_parser!(u64))
                .global(true),
        )
        .arg(
            arg!(--"no-progress")
                .required(false)
                .help("Print progress as plain lines instead of progress bars")
                .action(clap::ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("category")
                .about("Export every product of a catalog category")
                .arg(
                    arg!([NAME_OR_URL])
                        .required(false)
                        .help("Exact category name or its wildberries.ru URL (prompted if omitted)"),
                ),
        )
        .subcommand(
            command!("search")
                .about("Export the products found for a search keyword")
                .arg(
                    arg!([KEYWORD])
                        .required(false)
                        .help("Search query (prompted if omitted)"),
                ),
        )
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
