use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::{find_by_slug, search, CatalogError, LevelFilter, ProgramView};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ListQuery {
    search: String,
    level: String,
}

pub fn catalog_router() -> Router {
    Router::new()
        .route("/api/v1/programs", get(list_handler))
        .route("/api/v1/programs/:slug", get(detail_handler))
}

pub(crate) async fn list_handler(Query(query): Query<ListQuery>) -> Response {
    let level = match query.level.parse::<LevelFilter>() {
        Ok(level) => level,
        Err(err) => return catalog_error(err),
    };
    let programs: Vec<ProgramView> = search(&query.search, level)
        .into_iter()
        .map(ProgramView::from)
        .collect();
    Json(programs).into_response()
}

pub(crate) async fn detail_handler(Path(slug): Path<String>) -> Response {
    match find_by_slug(&slug) {
        Ok(program) => Json(ProgramView::from(program)).into_response(),
        Err(err) => catalog_error(err),
    }
}

fn catalog_error(err: CatalogError) -> Response {
    let status = match err {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::UnknownLevel(_) => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
