use anyhow::Result;
use backtail::cli::{Commands, ConfigAction};
use backtail::{cmd, logging};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "backtail", version)]
#[command(about = "Read the most recent lines of large log files, newest first", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Verbose diagnostics on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let outcome = match args.command {
        Commands::Tail(tail_args) => {
            let config = match cmd::load_config() {
                Ok(config) => config,
                Err(code) => std::process::exit(code),
            };
            return cmd::tail::run(&tail_args, &config);
        }
        Commands::Serve(serve_args) => {
            cmd::load_config().and_then(|config| cmd::serve::run(serve_args, config))
        }
        Commands::Init(init_args) => cmd::init::run(&init_args),
        Commands::Config { action } => match action {
            ConfigAction::Validate => cmd::config::validate(),
            ConfigAction::Show => cmd::config::show(),
        },
    };

    if let Err(code) = outcome {
        std::process::exit(code);
    }
    Ok(())
}
