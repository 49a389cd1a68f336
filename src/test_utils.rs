#[cfg(test)]
pub mod test_utils {
    use axum::{
        extract::Json,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
        Router,
    };
    use common::PredictionRequest;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG and defaults to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Stand-in for the prediction service.
    ///
    /// The symbol selects the behavior:
    /// - `DOWN`: 503 with an `error` field
    /// - `HTML`: 502 with a non-JSON body
    /// - `GARBAGE`: 200 with a body that is not a prediction
    /// - `SLOW`: a valid prediction after two seconds
    /// - anything else: a valid prediction echoing the symbol
    pub fn mock_prediction_router() -> Router {
        Router::new()
            .route(
                "/",
                get(|| async { Json(json!({ "message": "SMARTFIN Backend Running Successfully!" })) }),
            )
            .route("/predict", post(mock_predict))
    }

    async fn mock_predict(Json(request): Json<PredictionRequest>) -> Response {
        match request.symbol.as_str() {
            "DOWN" => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "model unavailable" })),
            )
                .into_response(),
            "HTML" => (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").into_response(),
            "GARBAGE" => (StatusCode::OK, "definitely not json").into_response(),
            "SLOW" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(sample_prediction("SLOW")).into_response()
            }
            symbol => Json(sample_prediction(symbol)).into_response(),
        }
    }

    pub fn sample_prediction(symbol: &str) -> serde_json::Value {
        json!({
            "symbol": symbol,
            "last_10_days": { "2024-01-01": 3500 },
            "today_trend": [],
            "news": [],
            "tomorrow_prediction": "Up",
            "suggestion": "Buy",
            "raw_prediction_value": 0.7321
        })
    }

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub async fn spawn_service(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock service failed");
        });

        format!("http://{}", addr)
    }

    /// A URL on which nothing is listening.
    pub async fn unreachable_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        drop(listener);
        format!("http://{}/predict", addr)
    }

    /// Fresh directory holding a minimal frontend bundle.
    pub fn setup_assets_dir() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        let dir = std::env::temp_dir().join(format!(
            "smartfin-assets-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir).expect("Failed to create assets dir");
        std::fs::write(
            dir.join("index.html"),
            "<!DOCTYPE html><html><body>SmartFin</body></html>",
        )
        .expect("Failed to write index.html");
        std::fs::write(dir.join("app.js"), "console.log('smartfin');")
            .expect("Failed to write app.js");
        dir
    }
}
