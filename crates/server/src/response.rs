//! Response builders shared by the dispatcher and the targets resource.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Response, StatusCode};
use reachard_http::protocol::ResponseBody;

const TEXT_PLAIN_UTF_8: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// Plain text response, `message` may be empty.
pub fn plain(status: StatusCode, message: &'static str) -> Response<ResponseBody> {
    with_content_type(status, TEXT_PLAIN_UTF_8, Bytes::from_static(message.as_bytes()))
}

/// Already serialized JSON response.
pub fn json(status: StatusCode, body: Vec<u8>) -> Response<ResponseBody> {
    with_content_type(status, APPLICATION_JSON, Bytes::from(body))
}

fn with_content_type(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<ResponseBody> {
    let mut response = Response::new(ResponseBody::new(body));
    *response.status_mut() = status;
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
