use crate::demo::{run_demo, run_durations, run_quote, DemoArgs, DurationsArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wallfin::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wallfin Credit Service",
    about = "Price, screen and collect Wallfin credit requests from the command line",
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
    /// Estimate the monthly installment and affordability of a credit
    Quote(QuoteArgs),
    /// List the terms offered for an amount
    Durations(DurationsArgs),
    /// Walk through a request submission and the follow-up flows
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
        Command::Quote(args) => run_quote(args),
        Command::Durations(args) => run_durations(args),
        Command::Demo(args) => run_demo(args),
    }
}
