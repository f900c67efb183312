use sea_orm::*;

use crate::entity::{user_profile, workshop_lecturer};
use crate::error::AppError;

/// Look up the profile backing an account. Every account gets one at
/// registration, so a miss is an internal inconsistency.
pub async fn find_profile<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<user_profile::Model, AppError> {
    user_profile::Entity::find()
        .filter(user_profile::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal(format!("user {user_id} has no profile row")))
}

/// Whether the profile lectures the given workshop.
pub async fn is_lecturer<C: ConnectionTrait>(
    db: &C,
    workshop_id: i32,
    user_profile_id: i32,
) -> Result<bool, AppError> {
    let found = workshop_lecturer::Entity::find()
        .filter(workshop_lecturer::Column::WorkshopId.eq(workshop_id))
        .filter(workshop_lecturer::Column::UserProfileId.eq(user_profile_id))
        .one(db)
        .await?;
    Ok(found.is_some())
}
