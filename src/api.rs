//! # API Server Module
//!
//! ## Purpose
//! REST API server exposing the drug-discovery workflow endpoints: target
//! search (the one real integration), workflow planning, and the placeholder
//! pipeline steps (ligand lookup, docking, simulation, ADMET prediction).
//!
//! ## Input/Output Specification
//! - **Input**: HTTP requests carrying free-text terms or goals in the path
//! - **Output**: JSON responses with target identifiers, workflow plans, or
//!   fixed placeholder messages
//! - **Endpoints**: Targets, planner, placeholders, health, stats
//!
//! ## Key Features
//! - CORS support for web frontends (configurable)
//! - Structured error responses
//! - A failed fetch is indistinguishable from "no targets found": both return
//!   an empty list, never an error status

use crate::errors::{DiscoveryError, Result};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Serialize;
use tracing::error;

/// Application state for the API server
pub struct ApiServer {
    app_state: crate::AppState,
}

/// Target search response payload
#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub condition_or_disease: String,
    pub targets: Vec<String>,
    pub query_time_ms: u64,
}

/// Workflow plan response payload
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub goal: String,
    pub workflow: crate::planner::WorkflowPlan,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub components: HealthComponents,
}

/// Component health status
#[derive(Debug, Serialize)]
pub struct HealthComponents {
    pub target_selector: String,
}

impl ApiServer {
    /// Create new API server
    pub async fn new(app_state: crate::AppState) -> Result<Self> {
        Ok(Self { app_state })
    }

    /// Run the API server
    pub async fn run(self) -> Result<()> {
        let bind_addr = format!(
            "{}:{}",
            self.app_state.config.server.host, self.app_state.config.server.port
        );
        let enable_cors = self.app_state.config.server.enable_cors;

        tracing::info!("Starting API server on {}", bind_addr);

        HttpServer::new(move || {
            // Cors::default() permits nothing cross-origin, which is the
            // "disabled" behavior for browser clients
            let cors = if enable_cors {
                Cors::permissive()
            } else {
                Cors::default()
            };

            App::new()
                .app_data(web::Data::new(self.app_state.clone()))
                .wrap(cors)
                .configure(routes)
        })
        .bind(&bind_addr)
        .map_err(|e| DiscoveryError::Internal {
            message: format!("Failed to bind server to {}: {}", bind_addr, e),
        })?
        .run()
        .await
        .map_err(|e| DiscoveryError::Internal {
            message: format!("Server error: {}", e),
        })?;

        Ok(())
    }
}

/// Register all routes; shared between the server and handler tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_handler))
        .route("/health", web::get().to(health_handler))
        .route("/stats", web::get().to(stats_handler))
        .route(
            "/targets/{condition_or_disease}",
            web::get().to(targets_handler),
        )
        .route("/plan_workflow/{goal}", web::post().to(plan_workflow_handler))
        .route("/workflow/run", web::post().to(run_workflow_handler))
        .route("/ligand/find", web::get().to(find_ligand_handler))
        .route("/dock/run", web::post().to(run_docking_handler))
        .route("/simulate/run", web::post().to(run_simulation_handler))
        .route("/predict/admet", web::post().to(predict_admet_handler));
}

/// Target search endpoint handler
async fn targets_handler(
    app_state: web::Data<crate::AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let condition_or_disease = path.into_inner();
    let start_time = std::time::Instant::now();

    match app_state.selector.find_targets(&condition_or_disease).await {
        Ok(targets) => Ok(HttpResponse::Ok().json(TargetsResponse {
            condition_or_disease,
            targets,
            query_time_ms: start_time.elapsed().as_millis() as u64,
        })),
        Err(e) => {
            error!("Target search error: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Target search failed",
                "message": e.to_string(),
            })))
        }
    }
}

/// Workflow planning endpoint handler
async fn plan_workflow_handler(
    app_state: web::Data<crate::AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let goal = path.into_inner();
    let workflow = app_state.planner.plan_workflow(&goal);
    Ok(HttpResponse::Ok().json(PlanResponse { goal, workflow }))
}

// Placeholder pipeline endpoints. Each returns a fixed message; the real
// implementations live behind future modules.

async fn run_workflow_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Workflow running" })))
}

async fn find_ligand_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Ligand found" })))
}

async fn run_docking_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Docking running" })))
}

async fn run_simulation_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Simulation running" })))
}

async fn predict_admet_handler() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "ADMET predicted" })))
}

/// Health check endpoint handler
async fn health_handler(app_state: web::Data<crate::AppState>) -> ActixResult<HttpResponse> {
    let selector_status = match app_state.selector.health_check().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let response = HealthResponse {
        status: selector_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        components: HealthComponents {
            target_selector: selector_status.to_string(),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Statistics endpoint handler
async fn stats_handler(app_state: web::Data<crate::AppState>) -> ActixResult<HttpResponse> {
    let response = serde_json::json!({
        "targets": app_state.selector.stats(),
        "cached_terms": app_state.selector.cached_terms(),
    });

    Ok(HttpResponse::Ok().json(response))
}

/// Index page handler
async fn index_handler() -> ActixResult<HttpResponse> {
    let html = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Pharmflow</title>
        <style>
            body { font-family: Arial, sans-serif; margin: 40px; }
            .header { color: #2c3e50; }
            .endpoint { margin: 20px 0; padding: 15px; background: #f8f9fa; border-radius: 5px; }
            .method { font-weight: bold; color: #27ae60; }
        </style>
    </head>
    <body>
        <h1 class="header">Pharmflow API</h1>
        <p>Skeletal drug-discovery workflow service. Target search queries the RCSB PDB; the remaining pipeline steps are placeholders.</p>

        <h2>Available Endpoints</h2>

        <div class="endpoint">
            <span class="method">GET</span> /targets/{condition_or_disease}
            <p>Find protein targets related to a condition or disease.</p>
        </div>

        <div class="endpoint">
            <span class="method">POST</span> /plan_workflow/{goal}
            <p>Produce the (static) workflow plan for a research goal.</p>
        </div>

        <div class="endpoint">
            <span class="method">POST</span> /workflow/run &middot;
            <span class="method">GET</span> /ligand/find &middot;
            <span class="method">POST</span> /dock/run &middot;
            <span class="method">POST</span> /simulate/run &middot;
            <span class="method">POST</span> /predict/admet
            <p>Placeholder pipeline steps.</p>
        </div>

        <div class="endpoint">
            <span class="method">GET</span> /health &middot;
            <span class="method">GET</span> /stats
            <p>Service health and target-search statistics.</p>
        </div>
    </body>
    </html>
    "#;

    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
