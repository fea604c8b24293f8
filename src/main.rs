use clap::Parser;
use passman::cli::{commands, output, Cli, Commands};
use passman::errors::PassmanError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Add { generate } => commands::add::execute(&cli, generate),
        Commands::Update { generate } => commands::update::execute(&cli, generate),
        Commands::Remove => commands::remove::execute(&cli),
        Commands::Copy { ref service } => commands::copy::execute(&cli, service),
        Commands::List { table, ref filter } => {
            commands::list::execute(&cli, table, filter.as_deref())
        }
        Commands::Open { ref editor } => commands::open::execute(&cli, editor.as_deref()),
        Commands::Path => commands::path::execute(&cli),
        Commands::Encrypt => commands::encrypt::execute_encrypt(&cli),
        Commands::Decrypt => commands::encrypt::execute_decrypt(&cli),
        Commands::Status => commands::status::execute(&cli),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    match result {
        Ok(()) => {}
        Err(PassmanError::UserCancelled) => {
            output::info("Cancelled.");
        }
        Err(e) => {
            output::error(&e.to_string());
            if e.is_password_required() {
                output::tip("Set PASSMAN_PASSWORD or run passman in a terminal to be prompted.");
            }
            std::process::exit(1);
        }
    }
}

/// Log to stderr. `PASSMAN_LOG` takes an `EnvFilter` directive and wins
/// over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PASSMAN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("passman={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
