use bytes::Bytes;
use http::{Response, StatusCode};
use http_body_util::Full;

/// Body type of every response produced through the invocation protocol.
///
/// Responses are always complete when handed to the engine, so a single
/// buffered frame is enough.
pub type ResponseBody = Full<Bytes>;

/// Response without a body, used by the engine itself when the handler can
/// not be asked for one.
pub(crate) fn build_error_response(status_code: StatusCode) -> Response<ResponseBody> {
    let mut response = Response::new(ResponseBody::default());
    *response.status_mut() = status_code;
    response
}
