//! Development implementation of the job-board REST API.
//!
//! Everything lives in memory; the process is meant for local development and
//! for exercising the client end to end.

pub mod applications;
pub mod assets;
pub mod auth;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod profiles;
pub mod store;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use jobboard_types::api::API_PREFIX;

pub use auth::{AppState, AppStateInner};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users/login", post(auth::login_jobseeker))
        .route("/employers/login", post(auth::login_employer))
        .route(
            "/users",
            post(auth::register_jobseeker)
                .get(profiles::get_jobseeker)
                .patch(profiles::update_jobseeker),
        )
        .route(
            "/employers",
            post(auth::register_employer)
                .get(profiles::get_employer)
                .patch(profiles::update_employer),
        )
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/employer", get(jobs::employer_jobs))
        .route(
            "/jobs/{id}",
            get(jobs::get_job).patch(jobs::update_job).delete(jobs::delete_job),
        )
        .route("/job-applications", post(applications::apply))
        .route("/job-applications/user", get(applications::user_applications))
        .route(
            "/job-applications/user/notifications",
            post(applications::set_notification_preference),
        )
        .route(
            "/job-applications/user/{id}",
            get(applications::user_application).delete(applications::delete_user_application),
        )
        .route("/job-applications/employer", get(applications::job_applications))
        .route(
            "/job-applications/employer/{id}/status",
            patch(applications::update_status),
        )
        .route(
            "/job-applications/notification",
            post(applications::notify_status_change),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .route("/assets/cvs/{file}", get(assets::resume))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
