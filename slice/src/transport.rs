//! Executes `HttpRequest` values built by `blog-core`.
//!
//! # Design
//! `Transport` is the seam between the slice and the network, so tests can
//! script responses without a server. `ReqwestTransport` is the real
//! implementation. It sets no timeout and never retries; a request waits on
//! reqwest's defaults until it completes or fails.

use std::future::Future;

use blog_core::{ApiError, FormPart, HttpMethod, HttpRequest, HttpResponse, PartValue, RequestBody};
use reqwest::multipart::{Form, Part};

pub trait Transport: Send + Sync {
    /// Perform the round-trip. Non-2xx statuses are returned as data;
    /// `Err` means no response was received.
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn prepare(&self, request: HttpRequest) -> Result<reqwest::RequestBuilder, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            Some(RequestBody::Json(body)) => builder.body(body),
            Some(RequestBody::Multipart(parts)) => builder.multipart(into_form(parts)?),
            None => builder,
        };
        Ok(builder)
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self
            .prepare(request)?
            .send()
            .await
            .map_err(|e| transport_error(method, &url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(method, &url, e))?;
        tracing::debug!(method = method.as_str(), %url, status, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn into_form(parts: Vec<FormPart>) -> Result<Form, ApiError> {
    parts.into_iter().try_fold(Form::new(), |form, part| match part.value {
        PartValue::Text(text) => Ok(form.text(part.name, text)),
        PartValue::File {
            file_name,
            content_type,
            bytes,
        } => {
            let file = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(&content_type)
                .map_err(|e| ApiError::Serialization(e.to_string()))?;
            Ok(form.part(part.name, file))
        }
    })
}

fn transport_error(method: HttpMethod, url: &str, err: reqwest::Error) -> ApiError {
    let message = if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("request failed: {err}")
    };
    tracing::warn!(method = method.as_str(), %url, error = %message, "transport failure");
    ApiError::Transport(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_accepts_text_and_file_parts() {
        let parts = vec![
            FormPart::text("title", "T"),
            FormPart {
                name: "image".to_string(),
                value: PartValue::File {
                    file_name: "a.png".to_string(),
                    content_type: "image/png".to_string(),
                    bytes: vec![1, 2],
                },
            },
        ];
        assert!(into_form(parts).is_ok());
    }

    #[test]
    fn form_rejects_invalid_mime() {
        let parts = vec![FormPart {
            name: "image".to_string(),
            value: PartValue::File {
                file_name: "a.bin".to_string(),
                content_type: "not a mime".to_string(),
                bytes: Vec::new(),
            },
        }];
        assert!(matches!(into_form(parts), Err(ApiError::Serialization(_))));
    }

    #[test]
    fn prepare_copies_headers() {
        let transport = ReqwestTransport::new();
        let request = HttpRequest {
            method: HttpMethod::Put,
            url: "http://localhost:1/blogs/a".to_string(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), "Bearer t".to_string()),
            ],
            body: Some(RequestBody::Json("{}".to_string())),
        };
        let built = transport.prepare(request).unwrap().build().unwrap();
        assert_eq!(built.method(), &reqwest::Method::PUT);
        assert_eq!(built.headers()["authorization"], "Bearer t");
        assert_eq!(built.headers()["content-type"], "application/json");
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let request = HttpRequest {
            method: HttpMethod::Get,
            url: format!("http://{addr}/blogs"),
            headers: Vec::new(),
            body: None,
        };
        let err = ReqwestTransport::new().execute(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
