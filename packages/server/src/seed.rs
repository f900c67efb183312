use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::{
    camp_interest_email, camp_participation, form_question_answer, role, role_permission,
    workshop,
};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &["admin", "organizer", "participant"];

/// Default role-permission mappings seeded on startup.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: all permissions
    ("admin", "user:see_all"),
    ("admin", "camp:edit"),
    ("admin", "workshop:see_all"),
    ("admin", "workshop:edit_all"),
    ("admin", "workshop:change_status"),
    ("admin", "participation:qualify"),
    ("admin", "registration:export"),
    ("admin", "resource:access_all"),
    ("admin", "article:edit"),
    // Organizer: everything but camp and article administration
    ("organizer", "user:see_all"),
    ("organizer", "workshop:see_all"),
    ("organizer", "workshop:change_status"),
    ("organizer", "participation:qualify"),
    ("organizer", "registration:export"),
    ("organizer", "resource:access_all"),
    // Participants carry no extra permissions.
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(role::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => roles_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role_name: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    role_permission::Column::RoleName,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => perms_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite unique indexes, so we
/// create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One registration per profile and year.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("uq_camp_participation_profile_year")
        .table(camp_participation::Entity)
        .col(camp_participation::Column::UserProfileId)
        .col(camp_participation::Column::Year)
        .to_string(PostgresQueryBuilder);
    ensure_index(db, "uq_camp_participation_profile_year", &stmt).await;

    // One answer per question and user.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("uq_form_question_answer_question_user")
        .table(form_question_answer::Entity)
        .col(form_question_answer::Column::QuestionId)
        .col(form_question_answer::Column::UserId)
        .to_string(PostgresQueryBuilder);
    ensure_index(db, "uq_form_question_answer_question_user", &stmt).await;

    // One interest registration per year and address.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("uq_camp_interest_email_year_email")
        .table(camp_interest_email::Entity)
        .col(camp_interest_email::Column::Year)
        .col(camp_interest_email::Column::Email)
        .to_string(PostgresQueryBuilder);
    ensure_index(db, "uq_camp_interest_email_year_email", &stmt).await;

    // Workshop slugs are unique within a year.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("uq_workshop_year_name")
        .table(workshop::Entity)
        .col(workshop::Column::Year)
        .col(workshop::Column::Name)
        .to_string(PostgresQueryBuilder);
    ensure_index(db, "uq_workshop_year_name", &stmt).await;

    Ok(())
}

async fn ensure_index(db: &DatabaseConnection, name: &str, stmt: &str) {
    match db.execute_unprepared(stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
    }
}
