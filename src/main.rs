use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sidebar_tree::config::{SidebarConfig, DEFAULT_ICON, DEFAULT_LOG_FILTER};
use sidebar_tree::export::{self, ExportFormat};
use sidebar_tree::seed;
use sidebar_tree::ui::{run_app, App};

#[derive(Parser)]
#[command(name = "sidebar-tree")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Collapsible, navigable sidebar tree menu for the terminal", long_about = None)]
struct Cli {
    /// Log filter directive (tracing-subscriber EnvFilter syntax)
    #[arg(long, global = true, env = "SIDEBAR_TREE_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the sidebar in an interactive terminal UI
    Browse {
        /// Seed file (defaults to the built-in menu)
        #[arg(short, long, env = "SIDEBAR_TREE_SEED")]
        seed: Option<PathBuf>,

        /// Icon given to new nodes when the dialog leaves it blank
        #[arg(long, default_value = DEFAULT_ICON)]
        default_icon: String,

        /// Write logs to this file (the UI owns the terminal)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Validate a seed file
    Check {
        /// Seed file to validate
        path: PathBuf,
    },
    /// Print the menu as JSON or Markdown
    Print {
        /// Seed file (defaults to the built-in menu)
        #[arg(short, long, env = "SIDEBAR_TREE_SEED")]
        seed: Option<PathBuf>,

        /// Output format: json, markdown
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,

        /// Expand every section before printing
        #[arg(long)]
        expand_all: bool,
    },
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Browse {
            seed,
            default_icon,
            log_file,
        }) => {
            init_logging(&cli.log, log_file.as_deref(), false)?;
            let config = SidebarConfig {
                log_filter: cli.log,
                ..SidebarConfig::default()
            }
            .with_seed(seed)
            .with_default_icon(default_icon);
            browse(config)
        }
        Some(Commands::Check { path }) => {
            init_logging(&cli.log, None, true)?;
            let forest = seed::load_file(&path)
                .with_context(|| format!("Invalid seed file: {}", path.display()))?;
            println!(
                "✅ {}: {} nodes in {} sections",
                path.display(),
                forest.len(),
                forest.roots().len()
            );
            Ok(())
        }
        Some(Commands::Print {
            seed,
            format,
            expand_all,
        }) => {
            init_logging(&cli.log, None, true)?;
            let config = SidebarConfig::default().with_seed(seed);
            let mut forest = config.load_forest().context("Failed to load menu")?;
            if expand_all {
                forest.set_all_expanded(true);
            }
            let stdout = io::stdout();
            export::export(format, forest.roots(), &mut stdout.lock())
                .context("Failed to write menu")?;
            Ok(())
        }
        Some(Commands::Version) => {
            println!("sidebar-tree v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("Sidebar Tree - Terminal sidebar menu");
            println!("Run 'sidebar-tree browse' to open the menu");
            println!("Run 'sidebar-tree --help' for more information");
            Ok(())
        }
    }
}

/// Install the tracing subscriber.
///
/// Logs go to `log_file` when given and to stderr when `to_stderr` is set.
/// With neither, events are dropped.
fn init_logging(filter: &str, log_file: Option<&Path>, to_stderr: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .with_context(|| format!("Invalid log filter: {}", filter))?;

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        }
        None => None,
    };
    let stderr_layer = to_stderr.then(|| fmt::layer().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn browse(config: SidebarConfig) -> anyhow::Result<()> {
    let forest = config.load_forest().context("Failed to load menu")?;
    let mut app = App::new(forest, config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal even when the event loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    tracing::info!(history = app.router.history().len(), "sidebar closed");
    Ok(())
}
