use hydrosys_core::error::ValidationError;
use tokio_stream::{Stream, StreamExt};
use warp::hyper::body::{Buf, Bytes};
use warp::Filter;

/// Request body, collected chunk by chunk up to `max_bytes`.
///
/// A body over the limit is not buffered further, the handler gets a
/// `MalformedPayload` instead.
pub(crate) fn limited(
    max_bytes: usize,
) -> impl Filter<Extract = (Result<Bytes, ValidationError>,), Error = warp::Rejection> + Clone {
    warp::body::stream().then(move |stream| read_limited(stream, max_bytes))
}

pub(crate) async fn read_limited<S, B>(
    stream: S,
    max_bytes: usize,
) -> Result<Bytes, ValidationError>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    tokio::pin!(stream);
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        let mut chunk = chunk.map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
        if body.len() + chunk.remaining() > max_bytes {
            return Err(ValidationError::MalformedPayload(format!(
                "payload exceeds {} bytes",
                max_bytes
            )));
        }
        while chunk.has_remaining() {
            let part = chunk.chunk();
            let len = part.len();
            body.extend_from_slice(part);
            chunk.advance(len);
        }
    }
    Ok(Bytes::from(body))
}
