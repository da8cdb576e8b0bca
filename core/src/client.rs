//! Stateless HTTP request builder and response parser for the blog API.
//!
//! # Design
//! `BlogClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the caller executes the round-trip.
//!
//! Every request goes through `BlogClient::request`, which attaches the
//! bearer header from the caller's `Credentials`. JSON and multipart bodies
//! share that path, so token handling has a single source of truth.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::types::{BlogPatch, BlogRecord, NewBlog};

#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(
        &self,
        credentials: &Credentials,
        method: HttpMethod,
        path: &str,
        body: Option<RequestBody>,
    ) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(RequestBody::Json(_)) = body {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if let Some(value) = credentials.authorization() {
            headers.push(("authorization".to_string(), value));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }

    pub fn build_list_blogs(&self, credentials: &Credentials) -> HttpRequest {
        self.request(credentials, HttpMethod::Get, "/blogs", None)
    }

    pub fn build_create_blog(&self, credentials: &Credentials, input: &NewBlog) -> HttpRequest {
        let body = RequestBody::Multipart(input.to_parts());
        self.request(credentials, HttpMethod::Post, "/blogs", Some(body))
    }

    pub fn build_update_blog(
        &self,
        credentials: &Credentials,
        id: &str,
        patch: &BlogPatch,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(patch).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(
            credentials,
            HttpMethod::Put,
            &format!("/blogs/{id}"),
            Some(RequestBody::Json(body)),
        ))
    }

    pub fn build_delete_blog(&self, credentials: &Credentials, id: &str) -> HttpRequest {
        self.request(credentials, HttpMethod::Delete, &format!("/blogs/{id}"), None)
    }

    pub fn parse_list_blogs(&self, response: HttpResponse) -> Result<Vec<BlogRecord>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// A failed create reports only a generic error, whatever the body says.
    pub fn parse_create_blog(&self, response: HttpResponse) -> Result<BlogRecord, ApiError> {
        if !response.is_success() {
            return Err(ApiError::CreateFailed {
                status: response.status,
            });
        }
        decode(&response)
    }

    pub fn parse_update_blog(&self, response: HttpResponse) -> Result<BlogRecord, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Returns the identifier that was deleted; the response body is ignored.
    pub fn parse_delete_blog(&self, id: &str, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response)?;
        Ok(id.to_string())
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::server(response.status, &response.body))
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::PartValue;
    use crate::types::Attachment;

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:3000/api")
    }

    fn token() -> Credentials {
        Credentials::bearer("tok")
    }

    #[test]
    fn build_list_blogs_produces_correct_request() {
        let req = client().build_list_blogs(&Credentials::anonymous());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/blogs");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn every_builder_attaches_bearer_token() {
        let c = client();
        let creds = token();
        let requests = vec![
            c.build_list_blogs(&creds),
            c.build_create_blog(&creds, &NewBlog::new("t", "c")),
            c.build_update_blog(&creds, "id1", &BlogPatch::new().title("x")).unwrap(),
            c.build_delete_blog(&creds, "id1"),
        ];
        for req in requests {
            assert_eq!(req.header("Authorization"), Some("Bearer tok"), "{:?}", req.method);
        }
    }

    #[test]
    fn build_create_blog_is_multipart() {
        let input = NewBlog::new("Hello", "World").with_image(Attachment {
            file_name: "a.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        });
        let req = client().build_create_blog(&token(), &input);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/blogs");
        assert!(req.header("content-type").is_none());
        let Some(RequestBody::Multipart(parts)) = req.body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts[0].value, PartValue::Text("Hello".to_string()));
        assert_eq!(parts[1].value, PartValue::Text("World".to_string()));
        assert_eq!(parts[2].name, "image");
    }

    #[test]
    fn build_update_blog_sends_partial_json() {
        let req = client()
            .build_update_blog(&token(), "b", &BlogPatch::new().title("B2"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/blogs/b");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let Some(RequestBody::Json(body)) = req.body else {
            panic!("expected json body");
        };
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, serde_json::json!({"title": "B2"}));
    }

    #[test]
    fn build_delete_blog_produces_correct_request() {
        let req = client().build_delete_blog(&Credentials::anonymous(), "a");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/api/blogs/a");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_blogs_preserves_order() {
        let response = HttpResponse::new(
            200,
            r#"[{"_id":"2","title":"B","content":""},{"_id":"1","title":"A","content":""}]"#,
        );
        let blogs = client().parse_list_blogs(response).unwrap();
        let ids: Vec<&str> = blogs.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn parse_list_blogs_surfaces_server_payload() {
        let response = HttpResponse::new(500, r#"{"message":"db down"}"#);
        let err = client().parse_list_blogs(response).unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(err.payload().unwrap()["message"], "db down");
    }

    #[test]
    fn parse_list_blogs_tolerates_null_title() {
        let response = HttpResponse::new(
            200,
            r#"[{"_id":"a","title":"A","content":"x"},{"_id":"b","title":null,"content":"y"}]"#,
        );
        let blogs = client().parse_list_blogs(response).unwrap();
        assert_eq!(blogs.len(), 2);
        assert_eq!(blogs[1].id, "b");
        assert_eq!(blogs[1].title, "");
        assert_eq!(blogs[1].content, "y");
    }

    #[test]
    fn parse_list_blogs_bad_json() {
        let err = client().parse_list_blogs(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_create_blog_accepts_any_2xx() {
        let body = r#"{"_id":"n","title":"New","content":"x"}"#;
        assert_eq!(client().parse_create_blog(HttpResponse::new(201, body)).unwrap().id, "n");
        assert_eq!(client().parse_create_blog(HttpResponse::new(200, body)).unwrap().id, "n");
    }

    #[test]
    fn parse_create_blog_failure_hides_body() {
        let response = HttpResponse::new(400, r#"{"message":"Title is required"}"#);
        let err = client().parse_create_blog(response).unwrap_err();
        assert!(matches!(err, ApiError::CreateFailed { status: 400 }));
        assert_eq!(err.to_string(), "Failed to create blog");
    }

    #[test]
    fn parse_update_blog_not_found_keeps_payload() {
        let response = HttpResponse::new(404, r#"{"message":"Blog not found"}"#);
        let err = client().parse_update_blog(response).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.rejection_message(), "Blog not found");
    }

    #[test]
    fn parse_delete_blog_returns_id() {
        let response = HttpResponse::new(200, r#"{"message":"Blog deleted"}"#);
        assert_eq!(client().parse_delete_blog("a", response).unwrap(), "a");
        assert_eq!(
            client().parse_delete_blog("a", HttpResponse::new(204, "")).unwrap(),
            "a"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BlogClient::new("http://localhost:3000/api/");
        let req = client.build_list_blogs(&Credentials::anonymous());
        assert_eq!(req.url, "http://localhost:3000/api/blogs");
    }

    #[test]
    fn from_config_uses_base_url() {
        let client = BlogClient::from_config(&ClientConfig::default());
        assert_eq!(client.base_url(), crate::config::DEFAULT_BASE_URL);
    }
}
