use serde_json::json;

use crate::common::{TestApp, routes};

/// One author, one recipe, one other user who toggles relations on it.
async fn toggle_fixture(app: &TestApp) -> (String, i32) {
    let admin = app.create_user_with_role("admin", "admin").await;
    let alice = app.create_authenticated_user("alice").await;
    let bob = app.create_authenticated_user("bob").await;

    let tag = app.create_tag(&admin, "dinner", "dinner").await;
    let salt = app.create_ingredient(&admin, "salt", "g").await;
    let recipe_id = app.create_recipe(&alice, "Soup", &[(salt, 5)], &[tag]).await;

    (bob, recipe_id)
}

mod favorites {
    use super::*;

    #[tokio::test]
    async fn add_returns_the_compact_recipe() {
        let app = TestApp::spawn().await;
        let (bob, recipe_id) = toggle_fixture(&app).await;

        let res = app
            .post_with_token(&routes::favorite(recipe_id), &json!({}), &bob)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["id"], recipe_id);
        assert_eq!(res.body["name"], "Soup");
        assert!(res.body["cooking_time"].is_number());
        assert!(
            res.body.get("ingredients").is_none(),
            "toggle bodies use the compact shape"
        );
    }

    #[tokio::test]
    async fn double_add_is_a_conflict() {
        let app = TestApp::spawn().await;
        let (bob, recipe_id) = toggle_fixture(&app).await;

        let first = app
            .post_with_token(&routes::favorite(recipe_id), &json!({}), &bob)
            .await;
        assert_eq!(first.status, 201);

        let res = app
            .post_with_token(&routes::favorite(recipe_id), &json!({}), &bob)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn remove_without_add_is_404() {
        let app = TestApp::spawn().await;
        let (bob, recipe_id) = toggle_fixture(&app).await;

        let res = app.delete_with_token(&routes::favorite(recipe_id), &bob).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn add_remove_add_cycle_works() {
        let app = TestApp::spawn().await;
        let (bob, recipe_id) = toggle_fixture(&app).await;

        let add = app
            .post_with_token(&routes::favorite(recipe_id), &json!({}), &bob)
            .await;
        assert_eq!(add.status, 201);

        let remove = app.delete_with_token(&routes::favorite(recipe_id), &bob).await;
        assert_eq!(remove.status, 204);

        let again = app
            .post_with_token(&routes::favorite(recipe_id), &json!({}), &bob)
            .await;
        assert_eq!(again.status, 201);
    }

    #[tokio::test]
    async fn adding_a_missing_recipe_is_404() {
        let app = TestApp::spawn().await;
        let bob = app.create_authenticated_user("bob").await;

        let res = app
            .post_with_token(&routes::favorite(4242), &json!({}), &bob)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn toggles_require_a_token() {
        let app = TestApp::spawn().await;
        let (_, recipe_id) = toggle_fixture(&app).await;

        let res = app
            .post_without_token(&routes::favorite(recipe_id), &json!({}))
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn favorite_flag_shows_up_in_the_read_model() {
        let app = TestApp::spawn().await;
        let (bob, recipe_id) = toggle_fixture(&app).await;

        app.post_with_token(&routes::favorite(recipe_id), &json!({}), &bob)
            .await;

        let res = app.get_with_token(&routes::recipe(recipe_id), &bob).await;
        assert_eq!(res.body["is_favorited"], true);
        assert_eq!(res.body["is_in_shopping_cart"], false);
    }
}

mod shopping_cart {
    use super::*;

    #[tokio::test]
    async fn cart_toggles_mirror_favorite_semantics() {
        let app = TestApp::spawn().await;
        let (bob, recipe_id) = toggle_fixture(&app).await;

        let add = app
            .post_with_token(&routes::shopping_cart(recipe_id), &json!({}), &bob)
            .await;
        assert_eq!(add.status, 201);
        assert_eq!(add.body["name"], "Soup");

        let dup = app
            .post_with_token(&routes::shopping_cart(recipe_id), &json!({}), &bob)
            .await;
        assert_eq!(dup.status, 400);
        assert_eq!(dup.body["code"], "CONFLICT");

        let remove = app
            .delete_with_token(&routes::shopping_cart(recipe_id), &bob)
            .await;
        assert_eq!(remove.status, 204);

        let missing = app
            .delete_with_token(&routes::shopping_cart(recipe_id), &bob)
            .await;
        assert_eq!(missing.status, 404);
    }

    #[tokio::test]
    async fn favorite_and_cart_are_independent_relations() {
        let app = TestApp::spawn().await;
        let (bob, recipe_id) = toggle_fixture(&app).await;

        app.post_with_token(&routes::favorite(recipe_id), &json!({}), &bob)
            .await;

        // the favorite row does not occupy the cart slot
        let res = app
            .post_with_token(&routes::shopping_cart(recipe_id), &json!({}), &bob)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let read = app.get_with_token(&routes::recipe(recipe_id), &bob).await;
        assert_eq!(read.body["is_favorited"], true);
        assert_eq!(read.body["is_in_shopping_cart"], true);
    }
}
