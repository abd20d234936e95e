use axum::{routing::get, Router};

use super::{
    collection_route, create_many, delete_many, delete_one, get_one, list, patch_many, patch_one,
    replace, Resource,
};
use crate::api::server::AppState;
use crate::models::Student;

impl Resource for Student {
    const NAME: &'static str = "Student";
}

pub fn routes() -> Router<AppState> {
    let collection = get(list::<Student>)
        .post(create_many::<Student>)
        .patch(patch_many::<Student>)
        .delete(delete_many::<Student>);

    collection_route(Router::new(), "/students", collection).route(
        "/students/{id}",
        get(get_one::<Student>)
            .put(replace::<Student>)
            .patch(patch_one::<Student>)
            .delete(delete_one::<Student>),
    )
}
