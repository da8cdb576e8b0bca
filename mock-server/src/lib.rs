use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: u64,
    #[serde(rename = "updatedAt")]
    pub updated_at: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Deserialize)]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields owned by the server; clients cannot overwrite them through `extra`.
const RESERVED_FIELDS: &[&str] = &["_id", "author", "image", "createdAt", "updatedAt"];

/// Newest first.
pub type Db = Arc<RwLock<Vec<Blog>>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    token: Option<Arc<str>>,
}

type Failure = (StatusCode, Json<MessageBody>);

fn failure(status: StatusCode, message: &str) -> Failure {
    (
        status,
        Json(MessageBody {
            message: message.to_string(),
        }),
    )
}

/// Router with no auth requirement.
pub fn app() -> Router {
    app_with_token(None)
}

/// When `token` is set, writes must carry `Authorization: Bearer <token>`.
pub fn app_with_token(token: Option<String>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Vec::new())),
        token: token.map(Arc::from),
    };
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/{id}", put(update_blog).delete(delete_blog))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_token(listener, None).await
}

pub async fn run_with_token(listener: TcpListener, token: Option<String>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Returns the caller's identity for authored records.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<Option<String>, Failure> {
    let Some(expected) = state.token.as_deref() else {
        return Ok(None);
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match presented {
        None => Err(failure(StatusCode::UNAUTHORIZED, "Not authorized, no token")),
        Some(token) if token == expected => {
            Ok(Some(format!("user:{}", token.chars().take(4).collect::<String>())))
        }
        Some(_) => Err(failure(StatusCode::UNAUTHORIZED, "Not authorized, token failed")),
    }
}

async fn list_blogs(State(state): State<AppState>) -> Json<Vec<Blog>> {
    let blogs = state.db.read().await;
    Json(blogs.clone())
}

async fn create_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Blog>), Failure> {
    let author = authorize(&state, &headers)?;

    let mut title = None;
    let mut content = None;
    let mut image = None;
    let mut extra = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| failure(StatusCode::BAD_REQUEST, &e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            field
                .bytes()
                .await
                .map_err(|e| failure(StatusCode::BAD_REQUEST, &e.body_text()))?;
            image = Some(format!("/uploads/{}-{file_name}", Uuid::new_v4().simple()));
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| failure(StatusCode::BAD_REQUEST, &e.body_text()))?;
        match name.as_str() {
            "title" => title = Some(text),
            "content" => content = Some(text),
            key if RESERVED_FIELDS.contains(&key) => {}
            _ => {
                extra.insert(name, Value::String(text));
            }
        }
    }

    let (Some(title), Some(content)) = (title, content) else {
        return Err(failure(StatusCode::BAD_REQUEST, "Title and content are required"));
    };
    let now = now_millis();
    let blog = Blog {
        id: Uuid::new_v4().simple().to_string(),
        title,
        content,
        author,
        image,
        created_at: now,
        updated_at: now,
        extra,
    };
    tracing::info!(id = %blog.id, "blog created");
    state.db.write().await.insert(0, blog.clone());
    Ok((StatusCode::CREATED, Json(blog)))
}

async fn update_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdateBlog>,
) -> Result<Json<Blog>, Failure> {
    authorize(&state, &headers)?;
    let mut blogs = state.db.write().await;
    let blog = blogs
        .iter_mut()
        .find(|b| b.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Blog not found"))?;
    if let Some(title) = input.title {
        blog.title = title;
    }
    if let Some(content) = input.content {
        blog.content = content;
    }
    blog.extra.extend(
        input
            .extra
            .into_iter()
            .filter(|(key, _)| !RESERVED_FIELDS.contains(&key.as_str())),
    );
    blog.updated_at = now_millis();
    tracing::info!(%id, "blog updated");
    Ok(Json(blog.clone()))
}

async fn delete_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, Failure> {
    authorize(&state, &headers)?;
    let mut blogs = state.db.write().await;
    let before = blogs.len();
    blogs.retain(|b| b.id != id);
    if blogs.len() == before {
        return Err(failure(StatusCode::NOT_FOUND, "Blog not found"));
    }
    tracing::info!(%id, "blog deleted");
    Ok(Json(MessageBody {
        message: "Blog deleted".to_string(),
    }))
}
