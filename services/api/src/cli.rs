use crate::console::{run_diagnose, run_report, DiagnoseArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use consult_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Consultation Triage Service",
    about = "Run the consultation triage service or evaluate symptoms from the command line",
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
    /// Score symptoms against the condition catalog and print the diagnosis
    Diagnose(DiagnoseArgs),
    /// Print the advisory report for a set of symptoms
    Report(ReportArgs),
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
        Command::Diagnose(args) => run_diagnose(args),
        Command::Report(args) => {
            run_report(args);
            Ok(())
        }
    }
}
