mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use common::{bearer, create_attribute, create_recipe, register, sample_recipe, test_app};

fn names(body: &Value) -> Vec<String> {
  body
    .as_array()
    .unwrap()
    .iter()
    .map(|item| item["name"].as_str().unwrap().to_string())
    .collect()
}

#[actix_web::test]
async fn test_tags_are_listed_by_name_for_their_owner() {
  let app = test_app().await;
  let alice = register(&app, "alice@example.com").await;
  let bob = register(&app, "bob@example.com").await;

  for name in ["Vegan", "Dessert", "Breakfast"] {
    create_attribute(&app, &alice, "tags", name).await;
  }
  create_attribute(&app, &bob, "tags", "Bob's tag").await;

  let req = test::TestRequest::get()
    .uri("/api/recipe/tags")
    .insert_header(bearer(&alice))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;

  assert_eq!(names(&body), vec!["Breakfast", "Dessert", "Vegan"]);
}

#[actix_web::test]
async fn test_create_attribute_returns_created() {
  let app = test_app().await;
  let token = register(&app, "cook@example.com").await;

  let req = test::TestRequest::post()
    .uri("/api/recipe/ingredients")
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "  Garlic  " }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["name"], "Garlic");
  assert!(body["id"].is_string());

  let req = test::TestRequest::post()
    .uri("/api/recipe/ingredients")
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_assigned_only_keeps_attached_items() {
  let app = test_app().await;
  let token = register(&app, "cook@example.com").await;
  let salt = create_attribute(&app, &token, "ingredients", "Salt").await;
  create_attribute(&app, &token, "ingredients", "Saffron").await;

  let mut soup = sample_recipe("Soup");
  soup["ingredients"] = json!([salt]);
  create_recipe(&app, &token, soup).await;

  let req = test::TestRequest::get()
    .uri("/api/recipe/ingredients?assigned_only=1")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(names(&body), vec!["Salt"]);

  let req = test::TestRequest::get()
    .uri("/api/recipe/ingredients?assigned_only=0")
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(names(&body), vec!["Saffron", "Salt"]);
}

#[actix_web::test]
async fn test_rename_with_put_and_patch() {
  let app = test_app().await;
  let token = register(&app, "cook@example.com").await;
  let id = create_attribute(&app, &token, "tags", "Lunch").await;
  let uri = format!("/api/recipe/tags/{}", id);

  let req = test::TestRequest::patch()
    .uri(&uri)
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "Brunch" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body, json!({ "id": id, "name": "Brunch" }));

  let req = test::TestRequest::put()
    .uri(&uri)
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "Supper" }))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["name"], "Supper");

  let req = test::TestRequest::get()
    .uri(&uri)
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["name"], "Supper");
}

#[actix_web::test]
async fn test_foreign_attribute_is_not_found() {
  let app = test_app().await;
  let alice = register(&app, "alice@example.com").await;
  let bob = register(&app, "bob@example.com").await;
  let id = create_attribute(&app, &alice, "tags", "Private").await;
  let uri = format!("/api/recipe/tags/{}", id);

  for req in [
    test::TestRequest::get().uri(&uri),
    test::TestRequest::delete().uri(&uri),
    test::TestRequest::patch()
      .uri(&uri)
      .set_json(json!({ "name": "Stolen" })),
  ] {
    let resp = test::call_service(&app, req.insert_header(bearer(&bob)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}

#[actix_web::test]
async fn test_tag_id_is_not_an_ingredient_id() {
  let app = test_app().await;
  let token = register(&app, "cook@example.com").await;
  let tag = create_attribute(&app, &token, "tags", "Spicy").await;

  let req = test::TestRequest::get()
    .uri(&format!("/api/recipe/ingredients/{}", tag))
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_deleting_tag_detaches_it_from_recipes() {
  let app = test_app().await;
  let token = register(&app, "cook@example.com").await;
  let tag = create_attribute(&app, &token, "tags", "Temporary").await;

  let mut recipe = sample_recipe("Tagged");
  recipe["tags"] = json!([tag]);
  let recipe = create_recipe(&app, &token, recipe).await;

  let resp = test::call_service(
    &app,
    test::TestRequest::delete()
      .uri(&format!("/api/recipe/tags/{}", tag))
      .insert_header(bearer(&token))
      .to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let req = test::TestRequest::get()
    .uri(&format!("/api/recipe/recipes/{}", recipe["id"].as_str().unwrap()))
    .insert_header(bearer(&token))
    .to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["tags"], json!([]));
}

#[actix_web::test]
async fn test_unknown_collection_is_not_found() {
  let app = test_app().await;
  let token = register(&app, "cook@example.com").await;

  for uri in ["/api/recipe/utensils", "/api/recipe/widgets/abc"] {
    let req = test::TestRequest::get()
      .uri(uri)
      .insert_header(bearer(&token))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri: {}", uri);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
  }
}

#[actix_web::test]
async fn test_repeated_query_parameter_is_a_validation_error() {
  let app = test_app().await;
  let token = register(&app, "cook@example.com").await;

  let req = test::TestRequest::get()
    .uri("/api/recipe/tags?assigned_only=1&assigned_only=0")
    .insert_header(bearer(&token))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "validation_error");
}
