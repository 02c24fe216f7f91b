//! HTTP Request domain types

mod body;
mod header;
mod method;
mod query;
mod spec;

pub use body::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, MultipartPart, RequestBody};
pub use header::{AUTHORIZATION, Header, Headers};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::ApiRequest;
