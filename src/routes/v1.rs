use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/tags", tag_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/recipes", recipe_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::auth::login))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::user::list_users).post(handlers::user::register),
        )
        .route("/me", get(handlers::user::me))
        .route("/set_password", post(handlers::user::set_password))
        .route("/subscriptions", get(handlers::user::list_subscriptions))
        .route("/{id}", get(handlers::user::get_user))
        .route(
            "/{id}/subscribe",
            post(handlers::user::subscribe).delete(handlers::user::unsubscribe),
        )
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::tag::list_tags).post(handlers::tag::create_tag),
        )
        .route("/{id}", get(handlers::tag::get_tag))
}

fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::ingredient::list_ingredients).post(handlers::ingredient::create_ingredient),
        )
        .route("/{id}", get(handlers::ingredient::get_ingredient))
}

fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::recipe::list_recipes).post(handlers::recipe::create_recipe),
        )
        .route(
            "/download_shopping_cart",
            get(handlers::recipe::download_shopping_cart),
        )
        .route(
            "/{id}",
            get(handlers::recipe::get_recipe)
                .patch(handlers::recipe::update_recipe)
                .delete(handlers::recipe::delete_recipe),
        )
        .route(
            "/{id}/favorite",
            post(handlers::recipe::add_favorite).delete(handlers::recipe::remove_favorite),
        )
        .route(
            "/{id}/shopping_cart",
            post(handlers::recipe::add_to_shopping_cart)
                .delete(handlers::recipe::remove_from_shopping_cart),
        )
        .layer(handlers::recipe::recipe_body_limit())
}
