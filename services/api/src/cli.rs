use crate::demo::{run_applicants_report, run_demo, ApplicantsArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_board::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Board",
    about = "Run the recruiter job board service or walk through its workflows from the command line",
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
    /// Print the applicants of a seeded job with status badges and match scores
    Applicants(ApplicantsArgs),
    /// Run an end-to-end demo: review, search, assign and reject on seeded data
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
        Command::Applicants(args) => run_applicants_report(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_board::workflows::recruiting::StatusFilter;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["job-board-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn applicants_command_parses_status_filter() {
        let cli = Cli::try_parse_from([
            "job-board-api",
            "applicants",
            "--job",
            "7",
            "--status",
            "shortlisted",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Applicants(args)) => {
                assert_eq!(args.job, 7);
                assert_eq!(args.status, StatusFilter::parse("shortlisted"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(
            Cli::try_parse_from(["job-board-api", "applicants", "--status", "archived"]).is_err()
        );
    }
}
