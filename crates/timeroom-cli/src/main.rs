use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "timeroom-cli", version, about = "Timeroom CLI")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print every event as a JSON line
    #[arg(long, global = true)]
    json: bool,

    /// Length of one timer second in milliseconds
    #[arg(long, global = true, hide = true)]
    tick_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timer in the foreground
    Timer {
        #[command(subcommand)]
        kind: commands::timer::TimerArgs,
    },
    /// Print what a timer would run, as JSON
    Plan {
        #[command(subcommand)]
        kind: commands::timer::TimerArgs,
    },
    /// List timer kinds
    Kinds,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Timer { kind } => commands::timer::run(
            kind,
            &commands::timer::RunOptions {
                json: cli.json,
                tick_ms: cli.tick_ms,
            },
        ),
        Commands::Plan { kind } => commands::plan::run(kind),
        Commands::Kinds => commands::kinds::run(cli.json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
