//! Minimal outbound HTTP client.
//!
//! `HttpTransport` is the seam between the reviews API and the runtime's
//! outbound HTTP. On `wasm32` it is backed by Spin; tests supply their own.

mod error;
mod request;
mod response;

use async_trait::async_trait;

pub use error::FetchError;
pub use request::HttpRequest;
pub use response::HttpResponse;

/// Sends a request and returns the raw response.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Send the request.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// Outbound HTTP through Spin.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl HttpTransport for SpinTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request, Response};

        let method = if request.method == http::Method::POST {
            SpinMethod::Post
        } else {
            SpinMethod::Get
        };

        let mut builder = Request::builder();
        builder.method(method);
        builder.uri(request.url.as_str());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder.body(body);
        }

        let response: Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::Send(e.to_string()))?;

        let status = http::StatusCode::from_u16(*response.status())
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(HttpResponse::new(status, response.body().to_vec()))
    }
}
