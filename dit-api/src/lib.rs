//! dit-api library - donation tracker HTTP API
//!
//! Serves the transformer's exported collections (or embedded mock data) and
//! keeps donations, donors, feedback and notifications submitted over HTTP in
//! per-process repositories.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

use models::Testimonial;
use repository::{DonationRepository, DonorRepository, FeedbackRepository, NotificationRepository};
use store::DataStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only campaigns and impact locations
    pub store: Arc<DataStore>,
    pub donations: DonationRepository,
    pub donors: DonorRepository,
    pub feedback: FeedbackRepository,
    pub notifications: NotificationRepository,
    pub testimonials: Arc<Vec<Testimonial>>,
}

impl AppState {
    /// Seed the repositories from the loaded store
    pub fn new(store: DataStore) -> Self {
        let donations = DonationRepository::new(store.donations.clone());
        Self {
            store: Arc::new(store),
            donations,
            donors: DonorRepository::new(crate::store::mock::donors()),
            feedback: FeedbackRepository::new(),
            notifications: NotificationRepository::new(crate::store::mock::notifications()),
            testimonials: Arc::new(crate::store::mock::testimonials()),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};

    let api = Router::new()
        .route(
            "/api/donations",
            get(api::donations::list_donations).post(api::donations::create_donation),
        )
        .route("/api/campaigns", get(api::campaigns::list_campaigns))
        .route("/api/impact-locations", get(api::campaigns::list_impact_locations))
        .route("/api/impact-summary", get(api::impact::impact_summary))
        .route(
            "/api/donors",
            get(api::donors::list_donors).post(api::donors::create_donor),
        )
        .route(
            "/api/donors/:id",
            get(api::donors::get_donor)
                .put(api::donors::update_donor)
                .delete(api::donors::delete_donor),
        )
        .route(
            "/api/feedback",
            get(api::feedback::list_feedback).post(api::feedback::submit_feedback),
        )
        .route(
            "/api/notifications",
            get(api::notifications::list_notifications).post(api::notifications::send_notification),
        )
        .route(
            "/api/notifications/unread-count",
            get(api::notifications::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            put(api::notifications::mark_all_read),
        )
        .route("/api/notifications/:id", put(api::notifications::mark_read))
        .route("/api/testimonials", get(api::testimonials::list_testimonials));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
