use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod set;
pub mod sync;
pub mod version;
pub mod watch;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect and stream board state changes as they arrive.
    Watch(WatchArgs),
    /// Arm or disarm one channel and wait for the echoed status.
    Set(SetArgs),
    /// Request a full state re-announce and print the snapshot.
    Sync(SyncArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub async fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Watch(args) => watch::run(args, format).await,
        Command::Set(args) => set::run(args, format).await,
        Command::Sync(args) => sync::run(args, format).await,
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Bridge address (host:port) exposing the relay byte stream.
    pub addr: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Bridge address (host:port) exposing the relay byte stream.
    pub addr: String,
    /// Target board id (0 is the master unit).
    #[arg(long, short, default_value = "0")]
    pub board: u16,
    /// Target channel id (1-6).
    #[arg(long, short)]
    pub channel: u8,
    /// Arm the channel.
    #[arg(long, conflicts_with = "disarm", required_unless_present = "disarm")]
    pub arm: bool,
    /// Disarm the channel.
    #[arg(long)]
    pub disarm: bool,
    /// Seconds to wait for the echoed status event.
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Bridge address (host:port) exposing the relay byte stream.
    pub addr: String,
    /// Seconds of wire silence treated as the end of the re-announce burst.
    #[arg(long, default_value_t = 1)]
    pub settle: u64,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {}
