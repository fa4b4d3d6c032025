//! Enchantment API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::convert;
use crate::core::ServerState;
use crate::db::repository::EnchantmentRepository;
use crate::utils::validation::{
    MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "enchantment";

/// GET /api/enchantments - 商店目录（仅 is_active）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<shared::Enchantment>>> {
    let repo = EnchantmentRepository::new(state.db.clone());
    let enchantments = repo.find_active().await?;
    Ok(Json(
        enchantments
            .into_iter()
            .map(convert::enchantment_view)
            .collect(),
    ))
}

/// GET /api/enchantments/:id - 单个目录条目
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<shared::Enchantment>> {
    let repo = EnchantmentRepository::new(state.db.clone());
    let enchantment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Enchantment {} not found", id)))?;
    Ok(Json(convert::enchantment_view(enchantment)))
}

/// GET /api/admin/enchantments - 全部条目，含隐藏
pub async fn admin_list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<shared::Enchantment>>> {
    let repo = EnchantmentRepository::new(state.db.clone());
    let enchantments = repo.find_all().await?;
    Ok(Json(
        enchantments
            .into_iter()
            .map(convert::enchantment_view)
            .collect(),
    ))
}

/// POST /api/admin/enchantments - 创建条目
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<shared::EnchantmentCreate>,
) -> AppResult<Json<shared::Enchantment>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    if payload.description.len() > MAX_DESCRIPTION_LEN {
        return Err(AppError::validation("description is too long"));
    }

    let repo = EnchantmentRepository::new(state.db.clone());
    let enchantment = repo.create(payload).await?;

    let id = enchantment.id.as_ref().map(|id| id.to_string());
    state.broadcast_sync(RESOURCE, "created", id.as_deref());

    Ok(Json(convert::enchantment_view(enchantment)))
}

/// PUT /api/admin/enchantments/:id - 部分更新（库存手动设置、可见性等）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<shared::EnchantmentUpdate>,
) -> AppResult<Json<shared::Enchantment>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;

    let repo = EnchantmentRepository::new(state.db.clone());
    let enchantment = repo.update(&id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated", Some(&id));

    Ok(Json(convert::enchantment_view(enchantment)))
}

/// DELETE /api/admin/enchantments/:id - 删除条目
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EnchantmentRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;

    if deleted {
        state.broadcast_sync(RESOURCE, "deleted", Some(&id));
    }

    Ok(Json(deleted))
}
