//! HTTP Transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest library.
//! It joins request paths onto the configured base address, negotiates JSON,
//! and encodes bodies.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use tracing::trace;
use url::Url;

use larder_application::ports::{HttpTransport, TransportError};
use larder_domain::request::{
    FORM_CONTENT_TYPE, Header, HttpMethod, JSON_CONTENT_TYPE, MultipartPart, RequestBody,
};
use larder_domain::{ApiRequest, ApiResponse, ClientSettings};

/// HTTP transport implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl ReqwestTransport {
    /// Creates a transport from client settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address is not a valid URL or the client
    /// cannot be created.
    pub fn new(settings: &ClientSettings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Self::with_client(client, settings)
    }

    /// Creates a transport with a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address is not a valid URL.
    pub fn with_client(client: Client, settings: &ClientSettings) -> Result<Self, TransportError> {
        let base_url = settings.base_url().to_string();
        Url::parse(&base_url).map_err(|e| TransportError::InvalidUrl(format!("{e}: {base_url}")))?;
        Ok(Self {
            client,
            base_url,
            timeout_ms: settings.timeout_ms,
        })
    }

    /// Returns the base address requests are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL: base address, path, then query pairs in order.
    fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(&raw).map_err(|e| TransportError::InvalidUrl(format!("{e}: {raw}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.pairs());
        }
        Ok(url)
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn multipart_part(part: &MultipartPart) -> Result<Part, TransportError> {
        let mime = mime_guess::from_path(&part.file_name).first_or_octet_stream();
        Part::bytes(part.content.clone())
            .file_name(part.file_name.clone())
            .mime_str(mime.as_ref())
            .map_err(|e| TransportError::InvalidBody(e.to_string()))
    }

    /// Encodes the body and sets its content type.
    fn build_body(builder: RequestBuilder, body: &RequestBody) -> Result<RequestBuilder, TransportError> {
        match body {
            RequestBody::None => Ok(builder),

            RequestBody::Json(value) => {
                let bytes =
                    serde_json::to_vec(value).map_err(|e| TransportError::InvalidBody(e.to_string()))?;
                Ok(builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(bytes))
            }

            RequestBody::Form(pairs) => {
                let encoded = serde_urlencoded::to_string(pairs)
                    .map_err(|e| TransportError::InvalidBody(e.to_string()))?;
                Ok(builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(encoded))
            }

            // reqwest sets the multipart content type with its boundary.
            RequestBody::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    form = form.part(part.name.clone(), Self::multipart_part(part)?);
                }
                Ok(builder.multipart(form))
            }
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: self.timeout_ms,
            };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed(error.to_string());
        }
        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(request)?;
        trace!(method = %request.method, %url, "Sending request");

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .header(ACCEPT, JSON_CONTENT_TYPE);
        for header in request.headers.iter() {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }
        builder = Self::build_body(builder, &request.body)?;

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| Header::new(name.as_str(), value.to_str().unwrap_or("<binary>")))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&e))?
            .to_vec();

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transport(api_url: &str) -> ReqwestTransport {
        ReqwestTransport::new(&ClientSettings::with_api_url(api_url)).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestTransport::to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestTransport::to_reqwest_method(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn test_url_keeps_base_prefix() {
        let transport = transport("http://localhost:8000/api/v1/");
        let request = ApiRequest::get("/meals")
            .with_query("search", "mac & cheese")
            .with_query("skip", 0);

        let url = transport.url_for(&request).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/meals?search=mac+%26+cheese&skip=0"
        );
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let url = transport("http://localhost:8000/api/v1")
            .url_for(&ApiRequest::get("/users/me"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/users/me");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let error = ReqwestTransport::new(&ClientSettings::with_api_url("not a url")).unwrap_err();
        assert!(matches!(error, TransportError::InvalidUrl(_)));
    }
}
