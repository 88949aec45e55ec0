//! HTTP transport layer for the Firebase AI request layer.

mod http;
mod error;
mod reqwest;
mod task;
mod request_url;
mod headers;
mod dispatcher;

pub use http::{HttpTransport, HttpMethod, HttpRequest, HttpResponse, ChunkedStream};
pub use error::TransportError;
pub use self::reqwest::ReqwestTransport;
pub use task::Task;
pub use request_url::RequestUrl;
pub use headers::{
    get_client_headers, get_headers, API_CLIENT_HEADER, API_KEY_HEADER, APP_CHECK_HEADER,
    APP_ID_HEADER, AUTHORIZATION_HEADER, CONTENT_TYPE_HEADER,
};
pub use dispatcher::Dispatcher;
