use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::schemas::ApiDoc;

pub fn print_openapi(output: Option<&Path>) -> Result<()> {
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize the OpenAPI document")?;
    debug!("OpenAPI document is {} bytes", document.len());

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("OpenAPI document written to {}", path.display());
        }
        None => println!("{document}"),
    }
    Ok(())
}
