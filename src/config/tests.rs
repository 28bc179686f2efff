use config::FileFormat;

use super::*;

fn raw_from_toml(source: &str) -> RawSettings {
    Config::builder()
        .add_source(File::from_str(source, FileFormat::Toml))
        .build()
        .expect("config builds")
        .try_deserialize()
        .expect("raw settings deserialize")
}

#[test]
fn defaults_read_the_current_directory() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(
        settings.site.location,
        SiteLocation::Directory(PathBuf::from("."))
    );
    assert_eq!(settings.site.manifest_path, "posts/manifest.json");
    assert_eq!(settings.site.start_fragment, "");
    assert_eq!(settings.site.nav, default_links());
    assert!(settings.projects.is_empty());
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = raw_from_toml(
        r#"
        [site]
        directory = "/srv/site"
        manifest_path = "posts/manifest.json"

        [logging]
        level = "info"
        "#,
    );

    let overrides = SiteOverrides {
        site_url: Some("https://example.com/me".to_string()),
        manifest_path: Some("blog/index.json".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_site_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    let expected = Url::parse("https://example.com/me/").expect("url");
    assert_eq!(settings.site.location, SiteLocation::Url(expected));
    assert_eq!(settings.site.manifest_path, "blog/index.json");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn url_and_directory_together_are_rejected() {
    let raw = raw_from_toml(
        r#"
        [site]
        url = "https://example.com/"
        directory = "/srv/site"
        "#,
    );

    let err = Settings::from_raw(raw).expect_err("ambiguous location");
    assert!(matches!(err, LoadError::Invalid { key: "site", .. }));
}

#[test]
fn non_http_urls_are_rejected() {
    let raw = raw_from_toml(
        r#"
        [site]
        url = "ftp://example.com/"
        "#,
    );

    let err = Settings::from_raw(raw).expect_err("bad scheme");
    assert!(matches!(err, LoadError::Invalid { key: "site.url", .. }));
}

#[test]
fn blank_manifest_path_is_rejected() {
    let mut raw = RawSettings::default();
    raw.site.manifest_path = Some("  ".to_string());

    let err = Settings::from_raw(raw).expect_err("blank path");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "site.manifest_path",
            ..
        }
    ));
}

#[test]
fn nav_and_projects_come_from_tables() {
    let raw = raw_from_toml(
        r##"
        [site]
        start_fragment = "#blog"
        nav = [
            { label = "About", section = "home" },
            { label = "Writing", section = "blog" },
        ]

        [[projects]]
        title = "Parser"
        categories = ["rust", "compilers"]

        [[projects]]
        title = "Sketchbook"
        "##,
    );

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.site.start_fragment, "blog");
    assert_eq!(
        settings.site.nav,
        [NavLink::new("About", "home"), NavLink::new("Writing", "blog")]
    );
    assert_eq!(settings.projects.len(), 2);
    assert_eq!(settings.projects[0].categories, ["rust", "compilers"]);
    assert!(settings.projects[1].categories.is_empty());
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = SiteOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_site_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn default_to_shell_command() {
    let args = CliArgs::parse_from(["folio"]);
    let command = args.command.unwrap_or_default();
    assert!(matches!(command, Command::Shell(_)));
}

#[test]
fn parse_visit_arguments() {
    let args = CliArgs::parse_from([
        "folio",
        "visit",
        "--site-directory",
        "/srv/site",
        "#post/hello",
    ]);

    match args.command.expect("visit command") {
        Command::Visit(visit) => {
            assert_eq!(
                visit.overrides.site_directory.as_deref(),
                Some(std::path::Path::new("/srv/site"))
            );
            assert_eq!(visit.fragment.as_deref(), Some("#post/hello"));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn site_url_conflicts_with_directory_on_the_command_line() {
    let result = CliArgs::try_parse_from([
        "folio",
        "shell",
        "--site-url",
        "https://example.com/",
        "--site-directory",
        "/srv/site",
    ]);
    assert!(result.is_err());
}

#[test]
fn parse_resolve_arguments() {
    let args = CliArgs::parse_from(["folio", "resolve", "", "post/a/b"]);

    match args.command.expect("resolve command") {
        Command::Resolve(resolve) => assert_eq!(resolve.fragments, ["", "post/a/b"]),
        _ => panic!("wrong command parsed"),
    }
}
