use std::{process, sync::Arc};

use folio::{
    application::{
        error::AppError,
        site::{EventLoop, SiteController, SiteOptions},
        source::ContentSource,
    },
    config::{self, Command, ResolveArgs, Settings, SiteLocation, VisitArgs},
    domain::route::resolve_route,
    infra::{error::InfraError, fs::DirectorySource, http::HttpContentSource, telemetry},
    presentation::{page::HeadlessPage, terminal::render_snapshot},
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{Dispatch, Level, debug, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

use crate::shell::{HELP, ShellInput, parse_line};

mod shell;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args.command.unwrap_or_default();

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        Command::Visit(args) => run_visit(settings, args).await,
        Command::Shell(_) => run_shell(settings).await,
        Command::Resolve(args) => run_resolve(args).await,
    }
}

struct Site {
    page: Arc<HeadlessPage>,
    controller: SiteController,
    events: EventLoop,
}

impl Site {
    async fn print(&self, out: &mut Stdout) -> Result<(), AppError> {
        let fragment = self.controller.router().location().fragment();
        let text = render_snapshot(&fragment, &self.page.snapshot());
        write_out(out, &text).await
    }

    async fn settle(&mut self) {
        let handled = self.events.run_until_idle().await;
        debug!(handled, "event loop idle");
    }
}

fn build_site(settings: Settings, start_fragment: String) -> Result<Site, AppError> {
    let source: Arc<dyn ContentSource> = match &settings.site.location {
        SiteLocation::Url(url) => Arc::new(HttpContentSource::new(url.as_str())?),
        SiteLocation::Directory(path) => {
            if !path.is_dir() {
                return Err(AppError::validation(format!(
                    "site directory `{}` does not exist",
                    path.display()
                )));
            }
            Arc::new(DirectorySource::new(path.clone()))
        }
    };
    info!(location = ?settings.site.location, "site source ready");

    let options = SiteOptions {
        manifest_path: settings.site.manifest_path,
        start_fragment,
        nav: settings.site.nav,
        projects: settings.projects,
    };
    let page = Arc::new(HeadlessPage::new(&options.nav, &options.projects));
    let (controller, events) = SiteController::build(source, page.clone(), options);

    Ok(Site {
        page,
        controller,
        events,
    })
}

async fn run_visit(settings: Settings, args: VisitArgs) -> Result<(), AppError> {
    let start = args
        .fragment
        .unwrap_or_else(|| settings.site.start_fragment.clone());
    let mut site = build_site(settings, start)?;

    site.controller.start().await;
    site.settle().await;

    let mut out = tokio::io::stdout();
    site.print(&mut out).await
}

async fn run_shell(settings: Settings) -> Result<(), AppError> {
    let start = settings.site.start_fragment.clone();
    let mut site = build_site(settings, start)?;
    let mut out = tokio::io::stdout();

    site.controller.start().await;
    site.settle().await;
    site.print(&mut out).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write_out(&mut out, "> ").await?;
        let Some(line) = lines.next_line().await.map_err(InfraError::from)? else {
            break;
        };

        match parse_line(&line) {
            Ok(ShellInput::Command(command)) => {
                site.controller.submit(command);
                site.settle().await;
                site.print(&mut out).await?;
            }
            Ok(ShellInput::Show) => site.print(&mut out).await?,
            Ok(ShellInput::Help) => write_out(&mut out, &format!("{HELP}\n")).await?,
            Ok(ShellInput::Empty) => {}
            Ok(ShellInput::Quit) => break,
            Err(err) => write_out(&mut out, &format!("{err}\n")).await?,
        }
    }

    Ok(())
}

async fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    let mut out = tokio::io::stdout();
    for fragment in &args.fragments {
        let route = resolve_route(fragment);
        write_out(&mut out, &format!("{fragment:?} -> {route:?}\n")).await?;
    }
    Ok(())
}

async fn write_out(out: &mut Stdout, text: &str) -> Result<(), AppError> {
    out.write_all(text.as_bytes())
        .await
        .map_err(InfraError::from)?;
    out.flush().await.map_err(InfraError::from)?;
    Ok(())
}
