use crate::demo::{run_assistant, run_demo, run_ledger, AssistantCommand, DemoArgs, LedgerArgs};
use crate::server;
use bcx_registry::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "BCX Registry",
    about = "Run and demonstrate the BCX carbon-credit registry from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the integrity assistant against a single project and print JSON
    Assistant {
        #[command(subcommand)]
        command: AssistantCommand,
    },
    /// Print the seeded ledger or export it as CSV
    Ledger(LedgerArgs),
    /// Walk a project from registration to retirement against seeded fixtures
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assistant { command } => run_assistant(command).await,
        Command::Ledger(args) => run_ledger(args),
        Command::Demo(args) => run_demo(args),
    }
}
