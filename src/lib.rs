pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod relations;
pub mod routes;
pub mod seed;
pub mod shopping_list;
pub mod state;
pub mod utils;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipebox API",
        version = "1.0.0",
        description = "API for the Recipebox recipe sharing service"
    ),
    paths(
        handlers::auth::login,
        handlers::user::register,
        handlers::user::list_users,
        handlers::user::me,
        handlers::user::get_user,
        handlers::user::set_password,
        handlers::user::list_subscriptions,
        handlers::user::subscribe,
        handlers::user::unsubscribe,
        handlers::tag::list_tags,
        handlers::tag::get_tag,
        handlers::tag::create_tag,
        handlers::ingredient::list_ingredients,
        handlers::ingredient::get_ingredient,
        handlers::ingredient::create_ingredient,
        handlers::recipe::list_recipes,
        handlers::recipe::create_recipe,
        handlers::recipe::get_recipe,
        handlers::recipe::update_recipe,
        handlers::recipe::delete_recipe,
        handlers::recipe::add_favorite,
        handlers::recipe::remove_favorite,
        handlers::recipe::add_to_shopping_cart,
        handlers::recipe::remove_from_shopping_cart,
        handlers::recipe::download_shopping_cart,
    ),
    tags(
        (name = "Auth", description = "Token issuance"),
        (name = "Users", description = "Registration and profiles"),
        (name = "Subscriptions", description = "Following recipe authors"),
        (name = "Tags", description = "Recipe tags"),
        (name = "Ingredients", description = "Ingredient reference data"),
        (name = "Recipes", description = "Recipe CRUD and filtering"),
        (name = "Favorites", description = "Favorite recipes"),
        (name = "Shopping Cart", description = "Cart and shopping-list export"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
