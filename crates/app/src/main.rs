use std::fmt;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use kartuli_core::model::CourseId;
use services::{AppServices, CourseService, MatchingService, SettingsService};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Parser)]
#[command(name = "kartuli")]
#[command(about = "Learn the Georgian alphabet, numbers and everyday phrases", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite URL or file path for saved progress.
    #[arg(
        long = "db",
        env = "KARTULI_DB_URL",
        default_value = "sqlite://kartuli.sqlite3",
        global = true
    )]
    db_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Open the desktop app (default).
    Ui,
    /// Print completion and lock state of every course.
    Progress,
    /// Forget every learned item of a course.
    Reset {
        /// Course slug, e.g. `alphabet`.
        course: String,
    },
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn matching(&self) -> Arc<MatchingService> {
        self.services.matching()
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn print_progress(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let courses = services.courses();
    courses.hydrate().await?;
    for overview in courses.overviews() {
        let pct = overview.percentage.unwrap_or(0);
        let lock = if overview.unlock.is_unlocked {
            String::new()
        } else {
            match overview.unlock.required_course_title {
                Some(title) => format!("  (locked: complete {title})"),
                None => "  (locked)".to_string(),
            }
        };
        println!(
            "{:<14} {:>3}/{:<3} {pct:>3}%{lock}",
            overview.id, overview.learned, overview.total
        );
    }
    Ok(())
}

async fn reset_course(services: &AppServices, raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let course: CourseId = raw.parse()?;
    services.courses().reset(&course).await?;
    println!("Progress for {course} cleared.");
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let db_url = normalize_sqlite_url(cli.db_url);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url).await?;
    tracing::info!(db = %db_url, "storage ready");

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Kartuli")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Progress => print_progress(&services).await,
        Command::Reset { course } => reset_course(&services, &course).await,
    }
}

/// `RUST_LOG` directives, or WARN when none are given.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[tokio::main]
async fn main() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
