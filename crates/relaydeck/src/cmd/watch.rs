use relaydeck_session::Session;
use relaydeck_transport::TcpChannel;
use tracing::info;

use crate::cmd::WatchArgs;
use crate::exit::{session_error, transport_error, CliResult, SUCCESS};
use crate::output::{print_change, OutputFormat};

pub async fn run(args: WatchArgs, format: OutputFormat) -> CliResult<i32> {
    let (channel, mut inbound) = TcpChannel::connect(&args.addr)
        .await
        .map_err(|err| transport_error("connect failed", err))?;
    let mut session = Session::start(channel)
        .await
        .map_err(|err| session_error("initial sync failed", err))?;

    info!(addr = %args.addr, "watching relay network");

    let result = tokio::select! {
        result = session.drive(&mut inbound, |model, change| {
            print_change(model, change, format);
        }) => result,
        _ = tokio::signal::ctrl_c() => Ok(()),
    };
    session.end();

    result.map_err(|err| session_error("session failed", err))?;
    Ok(SUCCESS)
}
