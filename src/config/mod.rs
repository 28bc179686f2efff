//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::site::DEFAULT_MANIFEST_PATH;
use crate::domain::navigation::{NavLink, default_links};
use crate::domain::projects::ProjectCard;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "folio";
const DEFAULT_SITE_DIRECTORY: &str = ".";

/// Command-line arguments for the folio binary.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Headless personal site navigator")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOLIO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load the site at one fragment and print the resulting page.
    Visit(VisitArgs),
    /// Drive the site interactively from stdin.
    Shell(ShellArgs),
    /// Print the route each fragment resolves to. Touches no content.
    Resolve(ResolveArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Shell(ShellArgs::default())
    }
}

#[derive(Debug, Args, Default, Clone)]
pub struct VisitArgs {
    #[command(flatten)]
    pub overrides: SiteOverrides,

    /// Fragment to open, with or without the leading `#`. Defaults to
    /// `site.start_fragment`.
    #[arg(value_name = "FRAGMENT")]
    pub fragment: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ShellArgs {
    #[command(flatten)]
    pub overrides: SiteOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ResolveArgs {
    #[arg(value_name = "FRAGMENT", required = true)]
    pub fragments: Vec<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SiteOverrides {
    /// Serve content from this base URL.
    #[arg(long = "site-url", value_name = "URL", value_hint = ValueHint::Url, conflicts_with = "site_directory")]
    pub site_url: Option<String>,

    /// Serve content from this local directory.
    #[arg(long = "site-directory", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub site_directory: Option<PathBuf>,

    /// Override the manifest path, relative to the site root.
    #[arg(long = "manifest-path", value_name = "PATH")]
    pub manifest_path: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub site: SiteSettings,
    pub projects: Vec<ProjectCard>,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub location: SiteLocation,
    pub manifest_path: String,
    pub start_fragment: String,
    pub nav: Vec<NavLink>,
}

/// Where site content is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteLocation {
    /// Base URL, always ending in `/`.
    Url(Url),
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOLIO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Visit(args)) => raw.apply_site_overrides(&args.overrides),
        Some(Command::Shell(args)) => raw.apply_site_overrides(&args.overrides),
        Some(Command::Resolve(_)) => {}
        None => raw.apply_site_overrides(&SiteOverrides::default()),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    site: RawSiteSettings,
    projects: Vec<ProjectCard>,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_site_overrides(&mut self, overrides: &SiteOverrides) {
        // A location given on the command line replaces whichever kind the
        // files configured.
        if let Some(url) = overrides.site_url.as_ref() {
            self.site.url = Some(url.clone());
            self.site.directory = None;
        }
        if let Some(directory) = overrides.site_directory.as_ref() {
            self.site.directory = Some(directory.clone());
            self.site.url = None;
        }
        if let Some(path) = overrides.manifest_path.as_ref() {
            self.site.manifest_path = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            site: build_site_settings(raw.site)?,
            projects: raw.projects,
            logging: build_logging_settings(raw.logging)?,
        })
    }
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let url = site.url.and_then(non_blank);
    let location = match (url, site.directory) {
        (Some(_), Some(_)) => {
            return Err(LoadError::invalid(
                "site",
                "set either `site.url` or `site.directory`, not both",
            ));
        }
        (Some(url), None) => SiteLocation::Url(parse_base_url(&url)?),
        (None, Some(directory)) => SiteLocation::Directory(directory),
        (None, None) => SiteLocation::Directory(PathBuf::from(DEFAULT_SITE_DIRECTORY)),
    };

    let manifest_path = match site.manifest_path {
        Some(path) => non_blank(path)
            .ok_or_else(|| LoadError::invalid("site.manifest_path", "must not be empty"))?,
        None => DEFAULT_MANIFEST_PATH.to_string(),
    };

    let start_fragment = site
        .start_fragment
        .map(|fragment| fragment.trim().trim_start_matches('#').to_string())
        .unwrap_or_default();

    let nav = match site.nav {
        Some(links) => {
            if let Some(link) = links.iter().find(|link| link.label.trim().is_empty()) {
                return Err(LoadError::invalid(
                    "site.nav",
                    format!("link to `{}` has an empty label", link.section),
                ));
            }
            links
        }
        None => default_links(),
    };

    Ok(SiteSettings {
        location,
        manifest_path,
        start_fragment,
        nav,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn parse_base_url(value: &str) -> Result<Url, LoadError> {
    let mut url = Url::parse(value)
        .map_err(|err| LoadError::invalid("site.url", format!("`{value}`: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "site.url",
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    url: Option<String>,
    directory: Option<PathBuf>,
    manifest_path: Option<String>,
    start_fragment: Option<String>,
    nav: Option<Vec<NavLink>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[cfg(test)]
mod tests;
