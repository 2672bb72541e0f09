//! Resource routes. Each collection gets list/create where the API exposes
//! them, and read/update/delete by id; nested collections hang off their parent.

use crate::handlers::{
    create, create_child, delete, link_place_amenity, list, list_children, list_place_amenities,
    places_search, read, unlink_place_amenity, update,
};
use crate::models::{Amenity, City, Place, Resource, Review, State, User};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use super::route_both;

/// GET/PUT/DELETE `/<collection>/:id` for one resource type.
fn by_id<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    let path = format!("/{}/:id", R::KIND.collection());
    route_both(router, &path, get(read::<R>).put(update::<R>).delete(delete::<R>))
}

/// GET/POST `/<collection>` for top-level resource types.
fn top_level<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    let path = format!("/{}", R::KIND.collection());
    route_both(router, &path, get(list::<R>).post(create::<R>))
}

/// GET/POST `/<parent>/:id/<collection>`.
fn nested<P: Resource, R: Resource>(router: Router<AppState>) -> Router<AppState> {
    let path = format!("/{}/:id/{}", P::KIND.collection(), R::KIND.collection());
    route_both(router, &path, get(list_children::<R>).post(create_child::<R>))
}

pub fn resource_routes() -> Router<AppState> {
    let mut router = Router::new();

    router = top_level::<Amenity>(router);
    router = top_level::<User>(router);
    router = top_level::<State>(router);

    router = nested::<State, City>(router);
    router = nested::<City, Place>(router);
    router = nested::<Place, Review>(router);

    router = by_id::<Amenity>(router);
    router = by_id::<City>(router);
    router = by_id::<Place>(router);
    router = by_id::<Review>(router);
    router = by_id::<State>(router);
    router = by_id::<User>(router);

    router = route_both(router, "/places/:id/amenities", get(list_place_amenities));
    router = route_both(
        router,
        "/places/:id/amenities/:amenity_id",
        post(link_place_amenity).delete(unlink_place_amenity),
    );
    route_both(router, "/places_search", post(places_search))
}
