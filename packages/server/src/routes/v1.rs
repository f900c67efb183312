use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .merge(camp_routes())
        .merge(participation_routes())
        .merge(profile_routes())
        .merge(workshop_routes())
        .merge(people_routes())
        .merge(article_routes())
        .merge(form_routes())
        .merge(resource_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn camp_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::camp::list_camps, handlers::camp::create_camp))
        .routes(routes!(handlers::camp::get_camp, handlers::camp::patch_camp))
        .routes(routes!(handlers::camp::register_interest))
        .routes(routes!(handlers::camp::plan_data))
}

fn participation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::participation::register_for_camp))
        .routes(routes!(handlers::participation::set_cover_letter))
        .routes(routes!(handlers::participation::my_status))
        .routes(routes!(handlers::participation::qualify))
        .routes(routes!(handlers::participation::delete_participation))
}

fn profile_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::profile::get_my_profile,
            handlers::profile::patch_my_profile
        ))
        .routes(routes!(handlers::profile::get_profile))
}

fn workshop_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::workshop::list_workshops,
            handlers::workshop::propose_workshop
        ))
        .routes(routes!(handlers::workshop::get_workshop))
        .routes(routes!(handlers::workshop::patch_workshop))
        .routes(routes!(handlers::workshop::change_workshop_status))
        .routes(routes!(
            handlers::workshop::register_to_workshop,
            handlers::workshop::unregister_from_workshop
        ))
        .routes(routes!(handlers::workshop::list_workshop_participants))
        .routes(routes!(handlers::workshop::grade_participant))
        .routes(routes!(
            handlers::solution::upsert_my_solution,
            handlers::solution::get_my_solution
        ))
        .routes(routes!(handlers::solution::get_solution))
}

fn people_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::people::list_participants))
        .routes(routes!(handlers::people::list_lecturers))
        .routes(routes!(handlers::people::list_all_people))
}

fn article_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::article::get_menu))
        .routes(routes!(
            handlers::article::get_article,
            handlers::article::upsert_article
        ))
}

fn form_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::form::list_forms))
        .routes(routes!(handlers::form::submit_answers))
}

fn resource_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::resource::list_my_resources))
        .routes(routes!(handlers::resource::auth_resource))
}
