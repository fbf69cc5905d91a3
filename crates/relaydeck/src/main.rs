mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "relaydeck", version, about = "Relay board control console")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);

    // All framing/reconcile work is event-driven on one task; a
    // current-thread runtime is enough.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            std::process::exit(exit::INTERNAL);
        }
    };

    match runtime.block_on(cmd::run(cli.command, format)) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_watch_subcommand() {
        let cli = Cli::try_parse_from(["relaydeck", "watch", "127.0.0.1:9000"])
            .expect("watch args should parse");
        assert!(matches!(cli.command, Command::Watch(_)));
    }

    #[test]
    fn parses_set_subcommand() {
        let cli = Cli::try_parse_from([
            "relaydeck",
            "set",
            "127.0.0.1:9000",
            "--board",
            "1",
            "--channel",
            "3",
            "--arm",
        ])
        .expect("set args should parse");
        assert!(matches!(cli.command, Command::Set(_)));
    }

    #[test]
    fn rejects_arm_and_disarm_together() {
        let err = Cli::try_parse_from([
            "relaydeck",
            "set",
            "127.0.0.1:9000",
            "--channel",
            "1",
            "--arm",
            "--disarm",
        ])
        .expect_err("conflicting flags should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn set_requires_a_verb() {
        let err = Cli::try_parse_from(["relaydeck", "set", "127.0.0.1:9000", "--channel", "1"])
            .expect_err("missing verb should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }
}
