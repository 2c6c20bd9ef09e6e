//! HTTP handlers and route configuration.

mod beta;
mod competition;
mod goalpost;
mod health;
mod submission;

use actix_web::web;

use signup_core::domain::GroupCount;
use signup_shared::dto::GroupCountDto;

pub use health::not_found;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::describe))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/beta-signups")
                        .route("", web::post().to(beta::create))
                        .route("", web::get().to(beta::count))
                        .route("/stats", web::get().to(beta::stats)),
                )
                .service(
                    web::scope("/competition-signups")
                        .route("", web::post().to(competition::create))
                        .route("", web::get().to(competition::count))
                        .route("/stats", web::get().to(competition::stats)),
                )
                .service(
                    web::scope("/competition-submissions")
                        .route("", web::post().to(submission::create))
                        .route("", web::get().to(submission::count))
                        .route("/recent", web::get().to(submission::recent)),
                )
                .service(
                    web::scope("/goalpost-beta")
                        .route("", web::post().to(goalpost::create))
                        .route("", web::get().to(goalpost::counts)),
                ),
        );
}

fn group_dtos(groups: Vec<GroupCount>) -> Vec<GroupCountDto> {
    groups
        .into_iter()
        .map(|g| GroupCountDto {
            key: g.key,
            count: g.count,
        })
        .collect()
}
