use serde_json::json;

use crate::common::{TestApp, routes};

/// Tags, ingredients, two authors and three recipes used by the filter tests.
struct Fixture {
    alice: String,
    bob: String,
    breakfast_tag: i32,
    soup_id: i32,
    porridge_id: i32,
    salad_id: i32,
}

async fn filter_fixture(app: &TestApp) -> Fixture {
    let admin = app.create_user_with_role("admin", "admin").await;
    let alice = app.create_authenticated_user("alice").await;
    let bob = app.create_authenticated_user("bob").await;

    let breakfast_tag = app.create_tag(&admin, "breakfast", "breakfast").await;
    let dinner_tag = app.create_tag(&admin, "dinner", "dinner").await;
    let salt = app.create_ingredient(&admin, "salt", "g").await;
    let oats = app.create_ingredient(&admin, "oats", "g").await;

    let soup_id = app
        .create_recipe(&alice, "Soup", &[(salt, 5)], &[dinner_tag])
        .await;
    let porridge_id = app
        .create_recipe(&alice, "Porridge", &[(oats, 50)], &[breakfast_tag])
        .await;
    let salad_id = app
        .create_recipe(&bob, "Salad", &[(salt, 2)], &[dinner_tag])
        .await;

    Fixture {
        alice,
        bob,
        breakfast_tag,
        soup_id,
        porridge_id,
        salad_id,
    }
}

fn listed_ids(body: &serde_json::Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

mod create {
    use super::*;

    #[tokio::test]
    async fn created_recipe_carries_the_full_read_model() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin", "admin").await;
        let alice = app.create_authenticated_user("alice").await;
        let tag = app.create_tag(&admin, "dinner", "dinner").await;
        let salt = app.create_ingredient(&admin, "salt", "g").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "name": "Borscht",
                    "text": "Boil the beets.",
                    "image": "data:image/png;base64,iVBORw0KGgo=",
                    "cooking_time": 45,
                    "ingredients": [{"id": salt, "amount": 5}],
                    "tags": [tag],
                }),
                &alice,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Borscht");
        assert_eq!(res.body["author"]["username"], "alice");
        assert_eq!(res.body["tags"][0]["slug"], "dinner");
        assert_eq!(res.body["ingredients"][0]["name"], "salt");
        assert_eq!(res.body["ingredients"][0]["amount"], 5);
        assert_eq!(res.body["ingredients"][0]["measurement_unit"], "g");
        assert_eq!(res.body["is_favorited"], false);
        assert_eq!(res.body["is_in_shopping_cart"], false);
    }

    #[tokio::test]
    async fn creation_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::RECIPES, &json!({"name": "Borscht"}))
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn recipe_without_ingredients_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin", "admin").await;
        let alice = app.create_authenticated_user("alice").await;
        let tag = app.create_tag(&admin, "dinner", "dinner").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "name": "Air",
                    "text": "Just air.",
                    "image": "data:image/png;base64,iVBORw0KGgo=",
                    "cooking_time": 1,
                    "ingredients": [],
                    "tags": [tag],
                }),
                &alice,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn out_of_range_cooking_time_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin", "admin").await;
        let alice = app.create_authenticated_user("alice").await;
        let tag = app.create_tag(&admin, "dinner", "dinner").await;
        let salt = app.create_ingredient(&admin, "salt", "g").await;

        for minutes in [0, 101] {
            let res = app
                .post_with_token(
                    routes::RECIPES,
                    &json!({
                        "name": "Borscht",
                        "text": "Boil the beets.",
                        "image": "data:image/png;base64,iVBORw0KGgo=",
                        "cooking_time": minutes,
                        "ingredients": [{"id": salt, "amount": 5}],
                        "tags": [tag],
                    }),
                    &alice,
                )
                .await;

            assert_eq!(res.status, 400, "cooking_time={minutes}");
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn out_of_range_ingredient_amount_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin", "admin").await;
        let alice = app.create_authenticated_user("alice").await;
        let tag = app.create_tag(&admin, "dinner", "dinner").await;
        let salt = app.create_ingredient(&admin, "salt", "g").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "name": "Borscht",
                    "text": "Boil the beets.",
                    "image": "data:image/png;base64,iVBORw0KGgo=",
                    "cooking_time": 45,
                    "ingredients": [{"id": salt, "amount": 0}],
                    "tags": [tag],
                }),
                &alice,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_ingredient_id_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin", "admin").await;
        let alice = app.create_authenticated_user("alice").await;
        let tag = app.create_tag(&admin, "dinner", "dinner").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "name": "Borscht",
                    "text": "Boil the beets.",
                    "image": "data:image/png;base64,iVBORw0KGgo=",
                    "cooking_time": 45,
                    "ingredients": [{"id": 4242, "amount": 5}],
                    "tags": [tag],
                }),
                &alice,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_image_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin", "admin").await;
        let alice = app.create_authenticated_user("alice").await;
        let tag = app.create_tag(&admin, "dinner", "dinner").await;
        let salt = app.create_ingredient(&admin, "salt", "g").await;

        let res = app
            .post_with_token(
                routes::RECIPES,
                &json!({
                    "name": "Borscht",
                    "text": "Boil the beets.",
                    "image": "",
                    "cooking_time": 45,
                    "ingredients": [{"id": salt, "amount": 5}],
                    "tags": [tag],
                }),
                &alice,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn anonymous_readers_see_recipes_with_false_flags() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        app.post_with_token(&routes::favorite(f.soup_id), &json!({}), &f.alice)
            .await;

        let res = app.get_without_token(&routes::recipe(f.soup_id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["is_favorited"], false);
        assert_eq!(res.body["is_in_shopping_cart"], false);
    }

    #[tokio::test]
    async fn missing_recipe_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::recipe(4242)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let res = app.get_without_token(routes::RECIPES).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            listed_ids(&res.body),
            vec![f.salad_id as i64, f.porridge_id as i64, f.soup_id as i64]
        );
    }
}

mod filters {
    use super::*;

    #[tokio::test]
    async fn author_filter_restricts_to_one_author() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;
        let bob_id = app.get_with_token(routes::ME, &f.bob).await.id();

        let res = app
            .get_without_token(&format!("{}?author={bob_id}", routes::RECIPES))
            .await;

        assert_eq!(listed_ids(&res.body), vec![f.salad_id as i64]);
    }

    #[tokio::test]
    async fn tag_filter_matches_any_of_the_given_slugs() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let one = app
            .get_without_token(&format!("{}?tags=breakfast", routes::RECIPES))
            .await;
        assert_eq!(listed_ids(&one.body), vec![f.porridge_id as i64]);

        let both = app
            .get_without_token(&format!("{}?tags=breakfast&tags=dinner", routes::RECIPES))
            .await;
        assert_eq!(both.body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_tag_slug_matches_nothing() {
        let app = TestApp::spawn().await;
        filter_fixture(&app).await;

        let res = app
            .get_without_token(&format!("{}?tags=brunch", routes::RECIPES))
            .await;

        assert_eq!(res.body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn favorited_filter_applies_to_the_requesting_user() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        app.post_with_token(&routes::favorite(f.soup_id), &json!({}), &f.bob)
            .await;

        let res = app
            .get_with_token(&format!("{}?is_favorited=1", routes::RECIPES), &f.bob)
            .await;

        assert_eq!(listed_ids(&res.body), vec![f.soup_id as i64]);
    }

    #[tokio::test]
    async fn favorited_filter_is_ignored_for_anonymous_requesters() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        app.post_with_token(&routes::favorite(f.soup_id), &json!({}), &f.bob)
            .await;

        let res = app
            .get_without_token(&format!("{}?is_favorited=1", routes::RECIPES))
            .await;

        assert_eq!(res.body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn zero_valued_flags_are_ignored() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        app.post_with_token(&routes::favorite(f.soup_id), &json!({}), &f.bob)
            .await;

        let res = app
            .get_with_token(&format!("{}?is_favorited=0", routes::RECIPES), &f.bob)
            .await;

        assert_eq!(res.body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn filters_compose_with_and() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;
        let alice_id = app.get_with_token(routes::ME, &f.alice).await.id();

        app.post_with_token(&routes::favorite(f.soup_id), &json!({}), &f.bob)
            .await;
        app.post_with_token(&routes::favorite(f.salad_id), &json!({}), &f.bob)
            .await;

        // favorited AND by alice AND tagged dinner: only the soup qualifies
        let res = app
            .get_with_token(
                &format!(
                    "{}?is_favorited=1&author={alice_id}&tags=dinner",
                    routes::RECIPES
                ),
                &f.bob,
            )
            .await;

        assert_eq!(listed_ids(&res.body), vec![f.soup_id as i64]);
    }

    #[tokio::test]
    async fn cart_filter_restricts_to_cart_contents() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        app.post_with_token(&routes::shopping_cart(f.porridge_id), &json!({}), &f.bob)
            .await;

        let res = app
            .get_with_token(
                &format!("{}?is_in_shopping_cart=1", routes::RECIPES),
                &f.bob,
            )
            .await;

        assert_eq!(listed_ids(&res.body), vec![f.porridge_id as i64]);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn author_can_update_scalar_fields() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let res = app
            .patch_with_token(
                &routes::recipe(f.soup_id),
                &json!({"name": "Better Soup", "cooking_time": 10}),
                &f.alice,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Better Soup");
        assert_eq!(res.body["cooking_time"], 10);
        // untouched fields survive
        assert_eq!(res.body["ingredients"][0]["name"], "salt");
    }

    #[tokio::test]
    async fn sending_ingredients_replaces_the_whole_set() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin", "admin").await;
        let alice = app.create_authenticated_user("alice").await;
        let tag = app.create_tag(&admin, "dinner", "dinner").await;
        let salt = app.create_ingredient(&admin, "salt", "g").await;
        let pepper = app.create_ingredient(&admin, "pepper", "g").await;
        let id = app.create_recipe(&alice, "Soup", &[(salt, 5)], &[tag]).await;

        let res = app
            .patch_with_token(
                &routes::recipe(id),
                &json!({"ingredients": [{"id": pepper, "amount": 2}]}),
                &alice,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let ingredients = res.body["ingredients"].as_array().unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0]["name"], "pepper");
    }

    #[tokio::test]
    async fn sending_tags_replaces_the_whole_set() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let res = app
            .patch_with_token(
                &routes::recipe(f.soup_id),
                &json!({"tags": [f.breakfast_tag]}),
                &f.alice,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let tags = res.body["tags"].as_array().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0]["slug"], "breakfast");
    }

    #[tokio::test]
    async fn non_author_cannot_update() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let res = app
            .patch_with_token(&routes::recipe(f.soup_id), &json!({"name": "Mine"}), &f.bob)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn admin_can_update_any_recipe() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;
        let admin = app.login("admin").await;

        let res = app
            .patch_with_token(
                &routes::recipe(f.soup_id),
                &json!({"name": "Moderated"}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Moderated");
    }

    #[tokio::test]
    async fn empty_patch_returns_the_recipe_unchanged() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let res = app
            .patch_with_token(&routes::recipe(f.soup_id), &json!({}), &f.alice)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Soup");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn author_can_delete_their_recipe() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let res = app.delete_with_token(&routes::recipe(f.soup_id), &f.alice).await;
        assert_eq!(res.status, 204);

        let gone = app.get_without_token(&routes::recipe(f.soup_id)).await;
        assert_eq!(gone.status, 404);
    }

    #[tokio::test]
    async fn delete_removes_relation_rows_too() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        app.post_with_token(&routes::favorite(f.soup_id), &json!({}), &f.bob)
            .await;
        app.post_with_token(&routes::shopping_cart(f.soup_id), &json!({}), &f.bob)
            .await;

        app.delete_with_token(&routes::recipe(f.soup_id), &f.alice).await;

        let favorites = app
            .get_with_token(&format!("{}?is_favorited=1", routes::RECIPES), &f.bob)
            .await;
        assert_eq!(favorites.body["data"].as_array().unwrap().len(), 0);

        let cart = app.get_with_token(routes::DOWNLOAD_SHOPPING_CART, &f.bob).await;
        assert_eq!(cart.status, 200);
        assert_eq!(cart.text.lines().count(), 1, "only the CSV header remains");
    }

    #[tokio::test]
    async fn non_author_cannot_delete() {
        let app = TestApp::spawn().await;
        let f = filter_fixture(&app).await;

        let res = app.delete_with_token(&routes::recipe(f.soup_id), &f.bob).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}
