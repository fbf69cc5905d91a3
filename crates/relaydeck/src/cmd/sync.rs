use std::time::Duration;

use relaydeck_proto::OutboundCommand;
use relaydeck_session::Session;
use relaydeck_transport::{ChannelEvent, TcpChannel};

use crate::cmd::SyncArgs;
use crate::exit::{session_error, transport_error, CliError, CliResult, FAILURE, SUCCESS};
use crate::output::{print_model, OutputFormat};

pub async fn run(args: SyncArgs, format: OutputFormat) -> CliResult<i32> {
    let (channel, mut inbound) = TcpChannel::connect(&args.addr)
        .await
        .map_err(|err| transport_error("connect failed", err))?;
    let mut session = Session::start(channel)
        .await
        .map_err(|err| session_error("initial sync failed", err))?;

    session
        .submit(&OutboundCommand::SyncAll)
        .await
        .map_err(|err| session_error("sync request failed", err))?;

    let settle = Duration::from_secs(args.settle);
    loop {
        match tokio::time::timeout(settle, inbound.recv()).await {
            Ok(Some(ChannelEvent::Data(chunk))) => {
                session.feed(&chunk);
            }
            Ok(Some(ChannelEvent::Closed(Some(err)))) => {
                session.end();
                return Err(transport_error("channel failed", err));
            }
            Ok(Some(ChannelEvent::Closed(None))) | Ok(None) => {
                session.end();
                break;
            }
            // Wire went quiet; the re-announce burst is over.
            Err(_elapsed) => break,
        }
    }

    if session.model().is_empty() {
        return Err(CliError::new(FAILURE, "no board-count sync received"));
    }
    print_model(session.model(), format);
    Ok(SUCCESS)
}
