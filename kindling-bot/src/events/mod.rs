pub mod mention;
pub mod message_log;

use std::future::Future;

use tracing::warn;

use kindling_core::Error;

/// Run the mention reply and the message log for one message.
///
/// A failed mention reply is logged and never keeps the message from being
/// recorded; only the log recorder's outcome is returned.
pub async fn run_message_handlers<M, L>(mention: M, log: L) -> Result<(), Error>
where
    M: Future<Output = Result<(), Error>>,
    L: Future<Output = Result<(), Error>>,
{
    if let Err(source) = mention.await {
        warn!(?source, "failed to answer bot mention");
    }

    log.await
}
