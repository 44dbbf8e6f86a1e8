use clap::Parser;
use gitrank_viewer::cli::Cli;
use gitrank_viewer::i18n::Lang;
use gitrank_viewer::models::Category;
use gitrank_viewer::view_model::StalePolicy;

#[test]
fn test_cli_to_viewer_config() {
    let cli = Cli::try_parse_from([
        "gitrank-viewer",
        "--data-root",
        "https://example.com/site",
        "--lang",
        "zh",
        "--page-size",
        "20",
        "--category",
        "top_users_list",
        "--apply-stale-loads",
    ])
    .unwrap();

    let config = cli.viewer_config().unwrap();
    assert_eq!(config.lang, Lang::Zh);
    assert_eq!(config.items_per_page, 20);
    assert_eq!(config.category, Category::TopUsersList);
    assert_eq!(config.stale_policy, StalePolicy::ApplyAll);
    assert!(!cli.once);
}

#[test]
fn test_cli_rejects_bad_values() {
    let cli = Cli::try_parse_from(["gitrank-viewer", "--lang", "en", "--page-size", "0"]).unwrap();
    assert!(cli.viewer_config().is_err());

    let cli = Cli::try_parse_from(["gitrank-viewer", "--lang", "en", "--category", "hourly"]).unwrap();
    assert!(cli.viewer_config().is_err());

    let cli = Cli::try_parse_from(["gitrank-viewer", "--lang", "klingon"]).unwrap();
    assert!(cli.viewer_config().is_err());
}
