//! Teacher routes, including the per-teacher student views

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};

use super::{
    collection_route, create_many, delete_many, delete_one, get_one, list, patch_many, patch_one,
    replace, Resource,
};
use crate::api::response::{parse_id, CountResponse, ListResponse, PathId};
use crate::api::server::AppState;
use crate::auth::{Session, STAFF_ROLES};
use crate::db::teachers::{student_count_for_teacher, students_for_teacher};
use crate::error::Result;
use crate::models::{Student, Teacher};

impl Resource for Teacher {
    const NAME: &'static str = "Teacher";
}

pub fn routes() -> Router<AppState> {
    let collection = get(list::<Teacher>)
        .post(create_many::<Teacher>)
        .patch(patch_many::<Teacher>)
        .delete(delete_many::<Teacher>);

    collection_route(Router::new(), "/teachers", collection)
        .route(
            "/teachers/{id}",
            get(get_one::<Teacher>)
                .put(replace::<Teacher>)
                .patch(patch_one::<Teacher>)
                .delete(delete_one::<Teacher>),
        )
        .route("/teachers/{id}/students", get(students))
        .route("/teachers/{id}/studentCount", get(student_count))
}

async fn students(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ListResponse<Student>>> {
    let students = students_for_teacher(&state.db, id).await?;
    Ok(Json(ListResponse::success(students)))
}

/// Role is checked before the id is even parsed
async fn student_count(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(raw_id): Path<String>,
) -> Result<Json<CountResponse>> {
    session.authorize(STAFF_ROLES)?;
    let id = parse_id(&raw_id)?;
    let count = student_count_for_teacher(&state.db, id).await?;
    Ok(Json(CountResponse::success(count)))
}
