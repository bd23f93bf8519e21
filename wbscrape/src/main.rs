use colored::Colorize;
use wbscrape::commands::command_argument_builder;
use wbscrape::handlers::{
    RunSettings, handle_category, handle_interactive, handle_search, init_tracing, print_banner,
};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    init_tracing();

    // Global flags are propagated down, so read them where they end up
    let settings = match chosen_command.subcommand() {
        Some((_, sub_matches)) => RunSettings::from_args(sub_matches),
        None => RunSettings::from_args(&chosen_command),
    };

    if !settings.quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("category", sub_matches)) => {
            let input = sub_matches.get_one::<String>("NAME_OR_URL").cloned();
            handle_category(&settings, input).await
        }
        Some(("search", sub_matches)) => {
            let keyword = sub_matches.get_one::<String>("KEYWORD").cloned();
            handle_search(&settings, keyword).await
        }
        None => handle_interactive(&settings).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
