//! Tag and ingredient endpoints
//!
//! Both collections share one set of handlers; the first path segment after
//! `/api/recipe` selects the [`AttributeKind`].

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AttributeListQuery, AttributeRequest, AttributeResponse},
  errors::ApiError,
};
use crate::application::auth::CurrentUser;
use crate::application::recipe::{
  AttributeKind, CreateAttributeCommand, CreateAttributeUseCase, DeleteAttributeCommand,
  DeleteAttributeUseCase, GetAttributeCommand, GetAttributeUseCase, ListAttributesCommand,
  ListAttributesUseCase, RenameAttributeCommand, RenameAttributeUseCase,
};

/// GET /api/recipe/{kind}
pub async fn list_attributes_handler(
  user: CurrentUser,
  path: web::Path<AttributeKind>,
  query: web::Query<AttributeListQuery>,
  use_case: web::Data<Arc<ListAttributesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let items = use_case
    .execute(ListAttributesCommand {
      user_id: user.user_id,
      kind: path.into_inner(),
      assigned_only: query.assigned_only(),
    })
    .await?;

  let items: Vec<AttributeResponse> = items.into_iter().map(Into::into).collect();
  Ok(HttpResponse::Ok().json(items))
}

/// POST /api/recipe/{kind}
pub async fn create_attribute_handler(
  user: CurrentUser,
  path: web::Path<AttributeKind>,
  request: web::Json<AttributeRequest>,
  use_case: web::Data<Arc<CreateAttributeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let item = use_case
    .execute(CreateAttributeCommand {
      user_id: user.user_id,
      kind: path.into_inner(),
      name: request.into_inner().name,
    })
    .await?;

  Ok(HttpResponse::Created().json(AttributeResponse::from(item)))
}

/// GET /api/recipe/{kind}/{id}
pub async fn get_attribute_handler(
  user: CurrentUser,
  path: web::Path<(AttributeKind, Uuid)>,
  use_case: web::Data<Arc<GetAttributeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let (kind, attribute_id) = path.into_inner();

  let item = use_case
    .execute(GetAttributeCommand {
      user_id: user.user_id,
      kind,
      attribute_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(AttributeResponse::from(item)))
}

/// PUT and PATCH /api/recipe/{kind}/{id}
///
/// The name is the only writable field, so both verbs rename.
pub async fn rename_attribute_handler(
  user: CurrentUser,
  path: web::Path<(AttributeKind, Uuid)>,
  request: web::Json<AttributeRequest>,
  use_case: web::Data<Arc<RenameAttributeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let (kind, attribute_id) = path.into_inner();

  let item = use_case
    .execute(RenameAttributeCommand {
      user_id: user.user_id,
      kind,
      attribute_id,
      name: request.into_inner().name,
    })
    .await?;

  Ok(HttpResponse::Ok().json(AttributeResponse::from(item)))
}

/// DELETE /api/recipe/{kind}/{id}
pub async fn delete_attribute_handler(
  user: CurrentUser,
  path: web::Path<(AttributeKind, Uuid)>,
  use_case: web::Data<Arc<DeleteAttributeUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let (kind, attribute_id) = path.into_inner();

  use_case
    .execute(DeleteAttributeCommand {
      user_id: user.user_id,
      kind,
      attribute_id,
    })
    .await?;

  Ok(HttpResponse::NoContent().finish())
}
