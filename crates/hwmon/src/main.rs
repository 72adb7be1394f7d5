mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hwmon",
    version,
    about = "An always-on-top CPU, GPU, and network monitor overlay"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the overlay in the foreground (default)
    Run,
    /// Start the overlay in the background
    Start,
    /// Close the running overlay
    Stop,
    /// Show whether the overlay is running
    Status,
    /// Create the default configuration file
    Init,
    /// Print the effective configuration as TOML
    Config,
    /// Take one sensor sample and print it
    Sensors {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List monitors and their work areas
    Monitors {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Init => commands::init::execute(),
        Commands::Config => commands::config::execute(),
        #[cfg(windows)]
        Commands::Run => commands::run::execute(),
        #[cfg(windows)]
        Commands::Start => commands::start::execute(),
        #[cfg(windows)]
        Commands::Stop => commands::stop::execute(),
        #[cfg(windows)]
        Commands::Status => commands::status::execute(),
        #[cfg(windows)]
        Commands::Sensors { json } => commands::sensors::execute(json),
        #[cfg(windows)]
        Commands::Monitors { json } => commands::monitors::execute(json),
        #[cfg(not(windows))]
        _ => {
            eprintln!("Error: hwmon supports Windows only.");
            std::process::exit(1);
        }
    }
}
