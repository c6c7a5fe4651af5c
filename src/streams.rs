use tracing::debug;

use crate::error::ApiError;
use crate::helix::{HelixTransport, STREAMS_ENDPOINT, get_json};
use crate::models::{LiveChannel, StreamsResponse};

/// Helix accepts at most this many `user_id` parameters per streams request.
pub const STREAMS_BATCH_SIZE: usize = 100;

/// Query the live status of `channel_ids`, one request per block of
/// [`STREAMS_BATCH_SIZE`] ids. Offline channels are simply absent from the
/// result; live ones come back in response order, batch by batch.
pub fn fetch_live_streams<H: HelixTransport + ?Sized>(
    transport: &H,
    channel_ids: &[String],
) -> Result<Vec<LiveChannel>, ApiError> {
    let first = STREAMS_BATCH_SIZE.to_string();
    let mut live: Vec<LiveChannel> = Vec::new();

    for (batch, chunk) in channel_ids.chunks(STREAMS_BATCH_SIZE).enumerate() {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(chunk.len() + 1);
        query.push(("first", first.as_str()));
        query.extend(chunk.iter().map(|id| ("user_id", id.as_str())));

        let response: StreamsResponse = get_json(transport, STREAMS_ENDPOINT, &query)?;
        debug!(batch, ids = chunk.len(), live = response.data.len(), "streams batch");
        live.extend(response.data.into_iter().map(LiveChannel::from));
    }

    Ok(live)
}

/// Number of streams requests needed for `ids` channels.
pub fn batch_count(ids: usize) -> usize {
    ids.div_ceil(STREAMS_BATCH_SIZE)
}
