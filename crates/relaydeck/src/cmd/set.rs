use std::time::Duration;

use relaydeck_proto::OutboundCommand;
use relaydeck_session::{ModelChange, Session, CHANNELS_PER_BOARD};
use relaydeck_transport::{ChannelEvent, TcpChannel};

use crate::cmd::SetArgs;
use crate::exit::{
    session_error, transport_error, CliError, CliResult, FAILURE, SUCCESS, TIMEOUT, USAGE,
};
use crate::output::{print_change, OutputFormat};

pub async fn run(args: SetArgs, format: OutputFormat) -> CliResult<i32> {
    if !(1..=CHANNELS_PER_BOARD).contains(&args.channel) {
        return Err(CliError::new(
            USAGE,
            format!("channel must be 1-{CHANNELS_PER_BOARD}"),
        ));
    }

    let (channel, mut inbound) = TcpChannel::connect(&args.addr)
        .await
        .map_err(|err| transport_error("connect failed", err))?;
    let mut session = Session::start(channel)
        .await
        .map_err(|err| session_error("initial sync failed", err))?;

    let armed = args.arm;
    session
        .submit(&OutboundCommand::SetChannel {
            board: args.board,
            channel: args.channel,
            armed,
        })
        .await
        .map_err(|err| session_error("command write failed", err))?;

    // The model only changes when the board echoes the status back; wait
    // for exactly that notification.
    let target = ModelChange::Changed {
        board: args.board,
        channel: Some(args.channel),
    };
    let waited = tokio::time::timeout(Duration::from_secs(args.timeout), async {
        while let Some(event) = inbound.recv().await {
            match event {
                ChannelEvent::Data(chunk) => {
                    if session.feed(&chunk).contains(&target) {
                        return Ok(());
                    }
                }
                ChannelEvent::Closed(err) => {
                    session.end();
                    return Err(match err {
                        Some(err) => transport_error("channel failed", err),
                        None => CliError::new(FAILURE, "channel closed before status echo"),
                    });
                }
            }
        }
        Err(CliError::new(FAILURE, "channel closed before status echo"))
    })
    .await;

    match waited {
        Ok(Ok(())) => {
            print_change(session.model(), target, format);
            Ok(SUCCESS)
        }
        Ok(Err(err)) => Err(err),
        Err(_elapsed) => Err(CliError::new(
            TIMEOUT,
            format!("no status echo within {}s", args.timeout),
        )),
    }
}
