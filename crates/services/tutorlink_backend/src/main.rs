// File: services/tutorlink_backend/src/main.rs
use axum::{routing::get, Router};
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tutorlink_common::{log_error, log_result, logging};
use tutorlink_config::load_config;
use tutorlink_db::{init_schema, DbClient};
use tutorlink_scheduling::routes as scheduling_routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Arc::new(load_config()?);
    logging::init_from_config(&config.logging);

    let db_client = log_result(
        DbClient::new(&config).await,
        "Database pool ready",
        "Failed to connect to the database",
    )?;
    log_result(
        init_schema(&db_client).await,
        "Schema ready",
        "Failed to initialize the schema",
    )?;

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Tutorlink API!" }))
        .merge(scheduling_routes(config.clone(), db_client));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    #[cfg(feature = "openapi")]
    {
        use tutorlink_scheduling::doc::SchedulingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Tutorlink API",
                version = "0.1.0",
                description = "Tutor availability and booking service"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.inspect_err(|e| {
        log_error(e, &format!("Failed to bind {}", addr));
    })?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
