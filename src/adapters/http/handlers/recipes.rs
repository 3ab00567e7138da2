use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    PatchRecipeRequest, RecipeDetailResponse, RecipeListQuery, RecipeRequest, RecipeResponse,
  },
  errors::ApiError,
};
use crate::application::auth::CurrentUser;
use crate::application::recipe::{
  CreateRecipeCommand, CreateRecipeUseCase, DeleteRecipeCommand, DeleteRecipeUseCase,
  GetRecipeDetailsCommand, GetRecipeDetailsUseCase, ListRecipesCommand, ListRecipesUseCase,
  PatchRecipeCommand, PatchRecipeUseCase, RecipeFields, ReplaceRecipeCommand,
  ReplaceRecipeUseCase,
};

impl From<RecipeRequest> for RecipeFields {
  fn from(request: RecipeRequest) -> Self {
    Self {
      title: request.title,
      time_minutes: request.time_minutes,
      price: request.price,
      link: request.link,
      tags: request.tags,
      ingredients: request.ingredients,
    }
  }
}

/// GET /api/recipe/recipes
///
/// Query: `tags` and `ingredients`, comma separated ids
pub async fn list_recipes_handler(
  user: CurrentUser,
  query: web::Query<RecipeListQuery>,
  use_case: web::Data<Arc<ListRecipesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ListRecipesCommand {
    user_id: user.user_id,
    tag_ids: query.tag_ids()?,
    ingredient_ids: query.ingredient_ids()?,
  };

  let response = use_case.execute(command).await?;
  let recipes: Vec<RecipeResponse> = response.recipes.into_iter().map(Into::into).collect();

  Ok(HttpResponse::Ok().json(recipes))
}

/// POST /api/recipe/recipes
pub async fn create_recipe_handler(
  user: CurrentUser,
  request: web::Json<RecipeRequest>,
  use_case: web::Data<Arc<CreateRecipeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let recipe = use_case
    .execute(CreateRecipeCommand {
      user_id: user.user_id,
      fields: request.into_inner().into(),
    })
    .await?;
  tracing::debug!("User {} created recipe {}", user.user_id, recipe.id);

  Ok(HttpResponse::Created().json(RecipeResponse::from(recipe)))
}

/// GET /api/recipe/recipes/{id}
///
/// Tags and ingredients are nested in the response.
pub async fn get_recipe_handler(
  user: CurrentUser,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetRecipeDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let details = use_case
    .execute(GetRecipeDetailsCommand {
      user_id: user.user_id,
      recipe_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(RecipeDetailResponse::from(details)))
}

/// PUT /api/recipe/recipes/{id}
pub async fn replace_recipe_handler(
  user: CurrentUser,
  path: web::Path<Uuid>,
  request: web::Json<RecipeRequest>,
  use_case: web::Data<Arc<ReplaceRecipeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let recipe = use_case
    .execute(ReplaceRecipeCommand {
      user_id: user.user_id,
      recipe_id: path.into_inner(),
      fields: request.into_inner().into(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(RecipeResponse::from(recipe)))
}

/// PATCH /api/recipe/recipes/{id}
pub async fn patch_recipe_handler(
  user: CurrentUser,
  path: web::Path<Uuid>,
  request: web::Json<PatchRecipeRequest>,
  use_case: web::Data<Arc<PatchRecipeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let recipe = use_case
    .execute(PatchRecipeCommand {
      user_id: user.user_id,
      recipe_id: path.into_inner(),
      title: request.title,
      time_minutes: request.time_minutes,
      price: request.price,
      link: request.link,
      tags: request.tags,
      ingredients: request.ingredients,
    })
    .await?;

  Ok(HttpResponse::Ok().json(RecipeResponse::from(recipe)))
}

/// DELETE /api/recipe/recipes/{id}
pub async fn delete_recipe_handler(
  user: CurrentUser,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteRecipeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(DeleteRecipeCommand {
      user_id: user.user_id,
      recipe_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}
