use crate::commands::{run_programs, run_report, run_reset, ProgramsCommand, ReportArgs, ResetArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use funding_calc::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Québec Funding Calculator",
    about = "Serve the funding calculator or inspect its programs and saved results",
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
    /// Browse the funding program catalog
    Programs {
        #[command(subcommand)]
        command: ProgramsCommand,
    },
    /// Print the results page for the saved answers and optionally write the document
    Report(ReportArgs),
    /// Clear the saved wizard answers
    Reset(ResetArgs),
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
        Command::Programs { command } => run_programs(command),
        Command::Report(args) => run_report(args),
        Command::Reset(args) => run_reset(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["funding-calc-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_program_lookups() {
        let cli = Cli::try_parse_from([
            "funding-calc-api",
            "programs",
            "list",
            "--search",
            "export",
            "--level",
            "federal",
        ])
        .expect("parses");
        let Some(Command::Programs {
            command: ProgramsCommand::List(args),
        }) = cli.command
        else {
            panic!("expected programs list");
        };
        assert_eq!(args.search.as_deref(), Some("export"));
        assert_eq!(args.level, "federal");

        let cli = Cli::try_parse_from(["funding-calc-api", "programs", "show", "cdap-boost"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Programs {
                command: ProgramsCommand::Show { ref slug }
            }) if slug == "cdap-boost"
        ));
    }
}
