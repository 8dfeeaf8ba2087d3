use std::convert::Infallible;
use std::future::ready;
use std::sync::Arc;

use futures::TryStreamExt;
use http::{Request, Response};
use http_body_util::BodyStream;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::connection::RequestCall;
use crate::handler::Handler;
use crate::protocol::{HttpError, ReceiveError, RequestHeader, ResponseBody};

/// An HTTP connection that feeds every request through the invocation protocol
///
/// `HttpConnection` leaves the wire format to hyper and owns only the
/// translation into [`Handler`] calls:
/// - the request head becomes the first, header-only invocation
/// - every non-empty data frame becomes one chunk invocation
/// - the end of the body becomes the `Eof` invocation
///
/// # Type Parameters
///
/// * `I`: The async stream type, usually a `TcpStream`
pub struct HttpConnection<I> {
    io: TokioIo<I>,
    builder: http1::Builder,
}

impl<I> HttpConnection<I>
where
    I: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(io: I) -> Self {
        let mut builder = http1::Builder::new();
        builder.keep_alive(true);
        Self { io: TokioIo::new(io), builder }
    }

    /// Serves requests until the peer closes the connection.
    pub async fn process<H>(self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler + 'static,
    {
        let service = service_fn(move |request: Request<Incoming>| {
            let handler = Arc::clone(&handler);
            async move { Ok::<_, Infallible>(handle_request(handler.as_ref(), request).await) }
        });

        self.builder.serve_connection(self.io, service).await?;
        Ok(())
    }
}

async fn handle_request<H: Handler>(handler: &H, request: Request<Incoming>) -> Response<ResponseBody> {
    let (parts, body) = request.into_parts();
    let header = RequestHeader::from(parts);
    debug!(method = %header.method(), path = header.path(), "receive request header");

    // trailers are not part of the body
    let payload = BodyStream::new(body)
        .map_err(ReceiveError::invalid_body)
        .try_filter_map(|frame| ready(Ok(frame.into_data().ok())));

    RequestCall::new(handler).run(header, payload).await
}

impl<I> std::fmt::Debug for HttpConnection<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnection").finish_non_exhaustive()
    }
}
