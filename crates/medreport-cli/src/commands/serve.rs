use medreport_config::AppConfig;

pub async fn run(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    eprintln!(
        "Starting medreport server on http://{}:{}",
        config.server.host, config.server.port
    );
    eprintln!("Endpoints: /, /health, /health/live, /upload, /analyze-text");

    medreport_server::serve(config).await
}
