use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use cloudflare::models::{Models, DEFAULT_BASE_URL};
use planner::{
    GenerationSettings, IdentificationSettings, Identifier, ItineraryService,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub mod healthz;
pub mod itinerary;
pub mod not_found;
pub mod recognition;
mod response;

pub use response::{ApiError, ApiResponse, ErrorBody, IntoApiResponse};

#[derive(Clone)]
pub struct ApiState {
    itinerary: Arc<ItineraryService<Models>>,
    identifier: Arc<Identifier<Models, Models>>,
    has_token: bool,
    has_account_id: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cloudflare: Cloudflare,
    pub generation: GenerationSettings,
    pub identification: IdentificationSettings,
    pub server: Server,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Cloudflare {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Cloudflare {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub allowed_origins: Vec<String>,
    pub max_image_bytes: usize,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        itinerary::generate_route,
        itinerary::refine_day,
        recognition::recognize_object,
        healthz::get_health,
    ),
    components(schemas(
        entity::prelude::Itinerary,
        entity::prelude::DayPlan,
        entity::prelude::RouteItem,
        entity::prelude::RouteItemType,
        entity::prelude::Language,
        entity::prelude::GenerationRequest,
        entity::prelude::RefineRequest,
        entity::prelude::IdentificationResult,
        entity::prelude::IdentificationMode,
        recognition::request::RecognizeObjectForm,
        healthz::HealthResponse,
        ErrorBody,
    )),
    tags(
        (name = "voyage", description = "Travel itinerary planning and object recognition API")
    )
)]
struct ApiDoc;

pub fn load_config(config_name: &str) -> anyhow::Result<Config> {
    util::load_config::<Config>(config_name)
        .with_context(|| format!("failed to load {}", config_name))
}

pub async fn serve(
    config: Config,
    cloudflare_token: String,
    cloudflare_account_id: String,
) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    let models = Models::new(
        &cloudflare_account_id,
        &cloudflare_token,
        &config.cloudflare.base_url,
        Duration::from_secs(config.cloudflare.timeout_secs),
    )?;

    let state = ApiState {
        itinerary: Arc::new(ItineraryService::new(
            models.clone(),
            config.generation.clone(),
        )),
        identifier: Arc::new(Identifier::new(
            models.clone(),
            models,
            config.identification.clone(),
        )),
        has_token: !cloudflare_token.is_empty(),
        has_account_id: !cloudflare_account_id.is_empty(),
    };

    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(task = "cors", origin = origin.as_str(), error = "invalid origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    // api
    let api_router = Router::new()
        .route("/generate-route", post(itinerary::generate_route))
        .route("/refine-day", post(itinerary::refine_day))
        .route(
            "/recognize-object",
            post(recognition::recognize_object)
                .layer(DefaultBodyLimit::max(config.server.max_image_bytes)),
        )
        .route("/health", get(healthz::get_health))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/healthz", get(healthz::get_health))
        .with_state(state)
        .nest("/api", api_router)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(not_found::get_404);

    Ok(router)
}
