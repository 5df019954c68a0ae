use std::io::{self, Read};
use std::path::PathBuf;

use medreport_config::AppConfig;
use medreport_core::{extract_file, AnalysisResult, ReportClassifier};

pub async fn run(
    config: &AppConfig,
    path: Option<PathBuf>,
    text: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match (path, text) {
        (_, Some(text)) => text,
        (Some(path), None) => {
            tracing::debug!(path = %path.display(), "Extracting report");
            extract_file(&path).await?
        }
        (None, None) => {
            // Read from stdin
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            String::from_utf8_lossy(&buffer).into_owned()
        }
    };

    let result = analyze(config, &text);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn analyze(config: &AppConfig, text: &str) -> AnalysisResult {
    ReportClassifier::from_config(&config.keywords).classify(text)
}
