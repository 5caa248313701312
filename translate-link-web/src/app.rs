//! Routes of the web front end

use axum::{
    Form, Router,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use tera::{Context, Tera};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use translate_link::{
    Config, LinkError, LinkResult, Lookup, MediaWikiClient, WikiApi, find_urls, lookup,
};

const SHOW_TEMPLATE: &str = include_str!("templates/show.html");

type Connect = dyn Fn(&Config) -> LinkResult<Arc<dyn WikiApi>> + Send + Sync;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Opens a wiki session; called once per request
    connect: Arc<Connect>,
}

impl AppState {
    /// State talking to the configured wiki, one client per request
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            connect: Arc::new(connect_live),
        }
    }

    /// State sharing one given wiki between all requests
    #[cfg(test)]
    pub fn with_wiki(config: Config, wiki: Arc<dyn WikiApi>) -> Self {
        Self {
            config: Arc::new(config),
            connect: Arc::new(move |_: &Config| -> LinkResult<Arc<dyn WikiApi>> {
                Ok(wiki.clone())
            }),
        }
    }

    fn wiki(&self) -> LinkResult<Arc<dyn WikiApi>> {
        (self.connect)(&self.config)
    }
}

fn connect_live(config: &Config) -> LinkResult<Arc<dyn WikiApi>> {
    let client = MediaWikiClient::from_config(config)?;
    Ok(Arc::new(client))
}

#[derive(Deserialize)]
pub struct LookupForm {
    pub key: String,
    #[serde(rename = "language-code")]
    pub language_code: String,
}

/// Failure of a request, rendered as plain text
#[derive(Debug)]
pub enum AppError {
    Link(LinkError),
    Template(tera::Error),
}

impl From<LinkError> for AppError {
    fn from(error: LinkError) -> Self {
        AppError::Link(error)
    }
}

impl From<tera::Error> for AppError {
    fn from(error: tera::Error) -> Self {
        AppError::Template(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Link(e) if e.is_remote() => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Link(e @ LinkError::InvalidKey { .. }) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Link(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Template(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render page: {}", e),
            ),
        };
        error!("{} {}", status, message);
        (status, message).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/show/", post(index_show))
        .route("/redirect/", post(index_redirect))
        .route("/show/{key}/{language_code}", get(show))
        .route("/redirect/{key}/{language_code}", get(redirect))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("deny"),
        ))
        .with_state(state)
}

/// Path of `route` for a key and language code, segments percent-encoded
fn lookup_path(route: &str, key: &str, language_code: &str) -> String {
    format!(
        "/{}/{}/{}",
        route,
        urlencoding::encode(key),
        urlencoding::encode(language_code)
    )
}

/// Percent-encode everything not allowed in a URI; existing escapes stay as they are
fn location_uri(iri: &str) -> String {
    let mut uri = String::with_capacity(iri.len());
    for c in iri.chars() {
        if c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c) {
            uri.push(c);
        } else {
            uri.push_str(&urlencoding::encode(c.encode_utf8(&mut [0; 4])));
        }
    }
    uri
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location_uri(location))]).into_response()
}

fn see_other(location: &str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location_uri(location))]).into_response()
}

async fn index() -> impl IntoResponse {
    Html(include_str!("static/index.html"))
}

async fn index_show(Form(form): Form<LookupForm>) -> Response {
    found(&lookup_path("show", &form.key, &form.language_code))
}

async fn index_redirect(Form(form): Form<LookupForm>) -> Response {
    found(&lookup_path("redirect", &form.key, &form.language_code))
}

async fn show(
    State(state): State<AppState>,
    Path((key, language_code)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let wiki = state.wiki()?;
    let urls = find_urls(
        wiki.as_ref(),
        &state.config.url_builder(),
        &key,
        &language_code,
    )
    .await?;

    let mut context = Context::new();
    context.insert("key", &key);
    context.insert("language_code", &language_code);
    context.insert("urls", &urls);
    let page = Tera::one_off(SHOW_TEMPLATE, &context, true)?;
    Ok(Html(page))
}

async fn redirect(
    State(state): State<AppState>,
    Path((key, language_code)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let wiki = state.wiki()?;
    let result = lookup(
        wiki.as_ref(),
        &state.config.url_builder(),
        &key,
        &language_code,
    )
    .await?;

    Ok(match result {
        Lookup::Redirect(url) => found(&url),
        // the show page handles every other result count
        Lookup::Disambiguation(_) => see_other(&lookup_path("show", &key, &language_code)),
    })
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
