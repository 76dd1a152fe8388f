use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "socialbattery", version, about = "Social battery and mood tracker")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log entries interactively and view the derived trend and rankings
    Session(commands::session::SessionArgs),
    /// Show the trend and top moods of an exported session
    Report(commands::report::ReportArgs),
    /// List the mood taxonomy
    Taxonomy {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "socialbattery=debug,socialbattery_core=debug"
    } else {
        "socialbattery=warn,socialbattery_core=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Session(args) => commands::session::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Taxonomy { json } => commands::taxonomy::run(json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
