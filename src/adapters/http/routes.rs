use actix_web::{
  HttpRequest,
  error::{JsonPayloadError, PathError, QueryPayloadError},
  web,
};
use std::sync::Arc;

use crate::application::auth::{
  DeleteCurrentUserUseCase, GetCurrentUserUseCase, LoginUserUseCase, LogoutAllDevicesUseCase,
  LogoutUserUseCase, RegisterUserUseCase, UpdateCurrentUserUseCase,
};
use crate::application::recipe::{
  CreateAttributeUseCase, CreateRecipeUseCase, DeleteAttributeUseCase, DeleteRecipeUseCase,
  GetAttributeUseCase, GetRecipeDetailsUseCase, ListAttributesUseCase, ListRecipesUseCase,
  PatchRecipeUseCase, RenameAttributeUseCase, ReplaceRecipeUseCase,
};
use crate::domain::auth::AuthService;
use crate::domain::recipe::RecipeService;

use super::errors::ApiError;
use super::handlers::{attributes, auth, health_handler, recipes};
use super::middleware::AuthMiddleware;

/// Every use case the HTTP API dispatches to
#[derive(Clone)]
pub struct ApiDependencies {
  pub register: Arc<RegisterUserUseCase>,
  pub login: Arc<LoginUserUseCase>,
  pub logout: Arc<LogoutUserUseCase>,
  pub logout_all: Arc<LogoutAllDevicesUseCase>,
  pub current_user: Arc<GetCurrentUserUseCase>,
  pub update_current_user: Arc<UpdateCurrentUserUseCase>,
  pub delete_current_user: Arc<DeleteCurrentUserUseCase>,

  pub list_recipes: Arc<ListRecipesUseCase>,
  pub create_recipe: Arc<CreateRecipeUseCase>,
  pub get_recipe: Arc<GetRecipeDetailsUseCase>,
  pub replace_recipe: Arc<ReplaceRecipeUseCase>,
  pub patch_recipe: Arc<PatchRecipeUseCase>,
  pub delete_recipe: Arc<DeleteRecipeUseCase>,

  pub list_attributes: Arc<ListAttributesUseCase>,
  pub create_attribute: Arc<CreateAttributeUseCase>,
  pub get_attribute: Arc<GetAttributeUseCase>,
  pub rename_attribute: Arc<RenameAttributeUseCase>,
  pub delete_attribute: Arc<DeleteAttributeUseCase>,
}

impl ApiDependencies {
  pub fn new(auth_service: Arc<AuthService>, recipe_service: Arc<RecipeService>) -> Self {
    Self {
      register: Arc::new(RegisterUserUseCase::new(auth_service.clone())),
      login: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      logout: Arc::new(LogoutUserUseCase::new(auth_service.clone())),
      logout_all: Arc::new(LogoutAllDevicesUseCase::new(auth_service.clone())),
      current_user: Arc::new(GetCurrentUserUseCase::new(auth_service.clone())),
      update_current_user: Arc::new(UpdateCurrentUserUseCase::new(auth_service.clone())),
      delete_current_user: Arc::new(DeleteCurrentUserUseCase::new(auth_service)),

      list_recipes: Arc::new(ListRecipesUseCase::new(recipe_service.clone())),
      create_recipe: Arc::new(CreateRecipeUseCase::new(recipe_service.clone())),
      get_recipe: Arc::new(GetRecipeDetailsUseCase::new(recipe_service.clone())),
      replace_recipe: Arc::new(ReplaceRecipeUseCase::new(recipe_service.clone())),
      patch_recipe: Arc::new(PatchRecipeUseCase::new(recipe_service.clone())),
      delete_recipe: Arc::new(DeleteRecipeUseCase::new(recipe_service.clone())),

      list_attributes: Arc::new(ListAttributesUseCase::new(recipe_service.clone())),
      create_attribute: Arc::new(CreateAttributeUseCase::new(recipe_service.clone())),
      get_attribute: Arc::new(GetAttributeUseCase::new(recipe_service.clone())),
      rename_attribute: Arc::new(RenameAttributeUseCase::new(recipe_service.clone())),
      delete_attribute: Arc::new(DeleteAttributeUseCase::new(recipe_service)),
    }
  }
}

/// Malformed JSON bodies answer with the same error shape as failed validation
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::Validation(err.to_string()).into()
}

/// An unparsable path segment names no resource
fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::NotFound(err.to_string()).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::Validation(err.to_string()).into()
}

/// Mount the whole API
///
/// # Routes
///
/// - GET /health
/// - /api/user: register, login, logout (public); logout-all, me (authenticated)
/// - /api/recipe/recipes and /api/recipe/recipes/{id} (authenticated)
/// - /api/recipe/{tags|ingredients} and /api/recipe/{tags|ingredients}/{id} (authenticated)
pub fn configure_api(cfg: &mut web::ServiceConfig, deps: &ApiDependencies) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .route("/health", web::get().to(health_handler));

  cfg.service(
    web::scope("/api/user")
      .app_data(web::Data::new(deps.register.clone()))
      .app_data(web::Data::new(deps.login.clone()))
      .app_data(web::Data::new(deps.logout.clone()))
      .app_data(web::Data::new(deps.logout_all.clone()))
      .app_data(web::Data::new(deps.update_current_user.clone()))
      .app_data(web::Data::new(deps.delete_current_user.clone()))
      .route("/register", web::post().to(auth::register_handler))
      .route("/login", web::post().to(auth::login_handler))
      .route("/logout", web::post().to(auth::logout_handler))
      .service(
        web::resource("/logout-all")
          .wrap(AuthMiddleware::new(deps.current_user.clone()))
          .route(web::post().to(auth::logout_all_handler)),
      )
      .service(
        web::resource("/me")
          .wrap(AuthMiddleware::new(deps.current_user.clone()))
          .route(web::get().to(auth::get_me_handler))
          .route(web::patch().to(auth::update_me_handler))
          .route(web::delete().to(auth::delete_me_handler)),
      ),
  );

  // "/recipes" must be registered before the "/{kind}" resources
  cfg.service(
    web::scope("/api/recipe")
      .wrap(AuthMiddleware::new(deps.current_user.clone()))
      .app_data(web::Data::new(deps.list_recipes.clone()))
      .app_data(web::Data::new(deps.create_recipe.clone()))
      .app_data(web::Data::new(deps.get_recipe.clone()))
      .app_data(web::Data::new(deps.replace_recipe.clone()))
      .app_data(web::Data::new(deps.patch_recipe.clone()))
      .app_data(web::Data::new(deps.delete_recipe.clone()))
      .app_data(web::Data::new(deps.list_attributes.clone()))
      .app_data(web::Data::new(deps.create_attribute.clone()))
      .app_data(web::Data::new(deps.get_attribute.clone()))
      .app_data(web::Data::new(deps.rename_attribute.clone()))
      .app_data(web::Data::new(deps.delete_attribute.clone()))
      .service(
        web::resource("/recipes")
          .route(web::get().to(recipes::list_recipes_handler))
          .route(web::post().to(recipes::create_recipe_handler)),
      )
      .service(
        web::resource("/recipes/{id}")
          .route(web::get().to(recipes::get_recipe_handler))
          .route(web::put().to(recipes::replace_recipe_handler))
          .route(web::patch().to(recipes::patch_recipe_handler))
          .route(web::delete().to(recipes::delete_recipe_handler)),
      )
      .service(
        web::resource("/{kind}")
          .route(web::get().to(attributes::list_attributes_handler))
          .route(web::post().to(attributes::create_attribute_handler)),
      )
      .service(
        web::resource("/{kind}/{id}")
          .route(web::get().to(attributes::get_attribute_handler))
          .route(web::put().to(attributes::rename_attribute_handler))
          .route(web::patch().to(attributes::rename_attribute_handler))
          .route(web::delete().to(attributes::delete_attribute_handler)),
      ),
  );
}
