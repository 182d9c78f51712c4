use std::error::Error as StdError;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_channel::bounded;
use clap::{ArgAction, Parser};
use humantime::parse_duration;
use tokio::signal;
use tokio::time::sleep;
use tracing::{info, warn};

use toasts::Result;
use toasts::config::Settings;
use toasts::manager::NotificationManager;
use toasts::navigate::Navigator;
use toasts::surface::{CardId, Marker, Surface};
use toasts::telemetry::init_tracing;
use toasts::templates::{DEFAULT_TEMPLATE, DirTemplates, StaticTemplates, TemplateSource};
use toasts::types::Notification;

const DEFAULT_CONFIG: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Console demo for the notification stack", long_about = None)]
struct Cli {
    /// Path to the TOML settings file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of sample notifications to post.
    #[arg(long, default_value_t = 8)]
    count: usize,

    /// Pause between posts (e.g. "750ms").
    #[arg(long, value_parser = parse_duration, default_value = "750ms")]
    interval: Duration,

    /// Directory with *.html card templates; built-in markup otherwise.
    #[arg(long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Log what would be posted without driving the stack.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Use a JSON layer for logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    json_logs: bool,

    /// Explicit log filter (e.g. "toasts=debug").
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            std::process::ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = Settings::from_env_and_file(&config_path)?;

    let templates = load_templates(cli.template_dir.as_deref(), &settings.template);
    let mut manager = NotificationManager::new(templates, LogNavigator, settings);
    manager.configure(ConsoleSurface::default());

    let (tx, rx) = bounded(16);
    let count = cli.count;
    let interval = cli.interval;
    let producer = tokio::spawn(async move {
        for notification in sample_feed(count) {
            if tx.send(notification).await.is_err() {
                break;
            }
            sleep(interval).await;
        }
    });

    let mut feed_open = true;
    loop {
        let now = Instant::now();
        manager.service(now);

        if !feed_open && manager.active() == 0 && manager.next_deadline().is_none() {
            break;
        }

        let idle = manager
            .next_deadline()
            .map_or(Duration::from_millis(250), |deadline| {
                deadline.saturating_duration_since(now)
            });

        tokio::select! {
            biased;
            _ = signal::ctrl_c() => {
                info!("shutdown signal received, stopping demo");
                break;
            }
            received = rx.recv(), if feed_open => {
                match received {
                    Ok(notification) => {
                        if cli.dry_run {
                            info!(title = %notification.title, "dry-run: would post notification");
                        } else if manager.post(notification, Instant::now())?.is_none() {
                            warn!("template unavailable, notification dropped");
                        }
                    }
                    Err(_) => feed_open = false,
                }
            }
            () = sleep(idle) => {}
        }
    }

    producer.abort();
    Ok(())
}

enum DemoTemplates {
    Dir(DirTemplates),
    Builtin(StaticTemplates),
}

impl TemplateSource for DemoTemplates {
    fn template(&self, name: &str) -> Option<String> {
        match self {
            Self::Dir(templates) => templates.template(name),
            Self::Builtin(templates) => templates.template(name),
        }
    }
}

fn load_templates(dir: Option<&std::path::Path>, template_name: &str) -> DemoTemplates {
    let builtin = || {
        DemoTemplates::Builtin(StaticTemplates::new().with(template_name, DEFAULT_TEMPLATE))
    };
    let Some(dir) = dir else {
        return builtin();
    };
    match DirTemplates::load(dir) {
        Ok(loaded) if !loaded.is_empty() => DemoTemplates::Dir(loaded),
        Ok(_) => {
            warn!(dir = %dir.display(), "no *.html templates found, using built-in markup");
            builtin()
        }
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "template directory unreadable, using built-in markup");
            builtin()
        }
    }
}

/// Console stand-in for a shell's notification area.
#[derive(Default)]
struct ConsoleSurface {
    children: Vec<CardId>,
}

impl Surface for ConsoleSurface {
    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn prepend(&mut self, card: CardId, markup: &str) {
        self.children.insert(0, card);
        let preview = markup.replace('\n', " ");
        info!(%card, stack = self.children.len(), preview = %preview, "card attached");
    }

    fn remove(&mut self, card: CardId) {
        self.children.retain(|child| *child != card);
        info!(%card, stack = self.children.len(), "card detached");
    }

    fn apply_marker(&mut self, card: CardId, marker: Marker) {
        info!(%card, class = marker.css_class(), "marker applied");
    }
}

struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&mut self, target: &str) {
        info!(target, "navigation requested");
    }
}

fn sample_feed(count: usize) -> Vec<Notification> {
    const SAMPLES: [(&str, &str, &str, Option<&str>); 4] = [
        ("Download complete", "screenshot.png saved to disk", "download", None),
        ("Flight ready", "Click to travel to Mars", "rocket", Some("Mars")),
        ("Bookmark added", "Olympus Mons pinned to the sidebar", "bookmark", Some("Olympus Mons")),
        ("Recording stopped", "Captured 42 frames", "camera", None),
    ];

    (0..count)
        .map(|index| {
            let (title, content, icon, target) = SAMPLES[index % SAMPLES.len()];
            let mut notification =
                Notification::new(format!("{title} #{}", index + 1), content, icon);
            if let Some(target) = target {
                notification = notification.with_navigation(target);
            }
            notification
        })
        .collect()
}

fn report_error(err: &toasts::error::Error) {
    eprintln!("Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
