//! Fixed-size re-chunking of byte streams.

use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use ccnews_core::TransportResult;
use futures_util::{Stream, StreamExt, stream};

struct State<S> {
    inner: Pin<Box<S>>,
    buf: BytesMut,
    done: bool,
}

/// Regroup `inner` into chunks of exactly `chunk_size` bytes.
///
/// Only the final chunk may be shorter. An error item is passed through
/// and ends the stream; buffered bytes before it are discarded.
pub(crate) fn rechunk<S>(
    inner: S,
    chunk_size: usize,
) -> impl Stream<Item = TransportResult<Bytes>> + Send + 'static
where
    S: Stream<Item = TransportResult<Bytes>> + Send + 'static,
{
    let chunk_size = chunk_size.max(1);
    let state = State {
        inner: Box::pin(inner),
        buf: BytesMut::with_capacity(chunk_size),
        done: false,
    };

    stream::unfold(state, move |mut st| async move {
        loop {
            if st.buf.len() >= chunk_size {
                let chunk = st.buf.split_to(chunk_size).freeze();
                return Some((Ok(chunk), st));
            }
            if st.done {
                if st.buf.is_empty() {
                    return None;
                }
                let chunk = st.buf.split().freeze();
                return Some((Ok(chunk), st));
            }
            match st.inner.next().await {
                Some(Ok(bytes)) => st.buf.extend_from_slice(&bytes),
                Some(Err(e)) => {
                    st.done = true;
                    st.buf.clear();
                    return Some((Err(e), st));
                }
                None => st.done = true,
            }
        }
    })
}
