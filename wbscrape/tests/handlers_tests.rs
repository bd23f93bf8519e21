use std::path::PathBuf;
use wbscrape::commands::command_argument_builder;
use wbscrape::handlers::*;

#[test]
fn test_parse_mode_category() {
    assert_eq!(parse_mode("1"), Some(Mode::Category));
    assert_eq!(parse_mode(" 1\n"), Some(Mode::Category));
}

#[test]
fn test_parse_mode_search() {
    assert_eq!(parse_mode("2"), Some(Mode::Search));
}

#[test]
fn test_parse_mode_invalid() {
    assert_eq!(parse_mode("3"), None);
    assert_eq!(parse_mode(""), None);
    assert_eq!(parse_mode("category"), None);
}

#[test]
fn test_strip_line_ending_keeps_inner_whitespace() {
    assert_eq!(strip_line_ending("Shoes\n"), "Shoes");
    assert_eq!(strip_line_ending("Shoes\r\n"), "Shoes");
    assert_eq!(strip_line_ending(" red  shoes \n"), " red  shoes ");
}

#[test]
fn test_default_cache_path() {
    assert_eq!(
        default_cache_path(&PathBuf::from("/tmp/out")),
        PathBuf::from("/tmp/out/catalog.json")
    );
}

#[test]
fn test_expand_path_plain() {
    assert_eq!(expand_path("exports"), PathBuf::from("exports"));
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/exports");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("exports"));
}

#[test]
fn test_settings_defaults() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wbscrape"])
        .unwrap();
    let settings = RunSettings::from_args(&matches);

    assert!(!settings.quiet);
    assert_eq!(settings.output_dir, PathBuf::from("."));
    assert_eq!(settings.cache_path, PathBuf::from("./catalog.json"));
    assert_eq!(settings.connect_timeout_secs, 5);
    assert_eq!(settings.timeout_secs, None);
    assert!(settings.show_progress_bars);
}

#[test]
fn test_settings_from_subcommand_flags() {
    let matches = command_argument_builder()
        .try_get_matches_from([
            "wbscrape",
            "search",
            "winter boots",
            "-o",
            "/tmp/exports",
            "--timeout",
            "30",
            "--connect-timeout",
            "2",
            "--no-progress",
            "-q",
        ])
        .unwrap();

    let (name, sub_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "search");
    assert_eq!(
        sub_matches.get_one::<String>("KEYWORD").map(String::as_str),
        Some("winter boots")
    );

    let settings = RunSettings::from_args(sub_matches);
    assert!(settings.quiet);
    assert_eq!(settings.output_dir, PathBuf::from("/tmp/exports"));
    assert_eq!(settings.cache_path, PathBuf::from("/tmp/exports/catalog.json"));
    assert_eq!(settings.timeout_secs, Some(30));
    assert_eq!(settings.connect_timeout_secs, 2);
    assert!(!settings.show_progress_bars);
}

#[test]
fn test_settings_explicit_cache_file() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wbscrape", "--cache-file", "/var/cache/wb.json", "category"])
        .unwrap();
    let (_, sub_matches) = matches.subcommand().unwrap();
    let settings = RunSettings::from_args(sub_matches);

    assert_eq!(settings.cache_path, PathBuf::from("/var/cache/wb.json"));
}

#[test]
fn test_invalid_timeout_is_rejected() {
    let result = command_argument_builder().try_get_matches_from(["wbscrape", "--timeout", "soon"]);
    assert!(result.is_err());
}
