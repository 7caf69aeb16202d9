use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler, health_handler,
    list_bookmarks_handler, update_bookmark_handler,
};
use crate::state::AppState;

/// Which browser origins may call the API.
#[derive(Debug, Clone, Default)]
pub enum CorsPolicy {
    /// Any origin.
    #[default]
    Permissive,
    /// Only the listed origins.
    AllowList(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Any origin when `origins` is empty, otherwise exactly those origins.
    pub fn from_origins(origins: Vec<HeaderValue>) -> Self {
        if origins.is_empty() {
            Self::Permissive
        } else {
            Self::AllowList(origins)
        }
    }

    fn layer(self) -> CorsLayer {
        let origin = match self {
            CorsPolicy::Permissive => AllowOrigin::from(Any),
            CorsPolicy::AllowList(origins) => AllowOrigin::list(origins),
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub struct App {}

impl App {
    pub fn router(state: AppState, cors: CorsPolicy) -> Router {
        let collection = get(list_bookmarks_handler).post(create_bookmark_handler);
        let member = get(get_bookmark_handler)
            .put(update_bookmark_handler)
            .delete(delete_bookmark_handler);

        Router::new()
            .route("/health", get(health_handler))
            .route("/bookmarks/", collection.clone())
            .route("/bookmarks", collection)
            .route("/bookmarks/{id}/", member.clone())
            .route("/bookmarks/{id}", member)
            .layer(TraceLayer::new_for_http())
            .layer(cors.layer())
            .with_state(state)
    }
}
