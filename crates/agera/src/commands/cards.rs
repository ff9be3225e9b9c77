//! Online card commands: fetch through the API, write the PNG to disk.

use std::path::{Path, PathBuf};

use agera_cards::CardService;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;
use crate::request::CardRequest;

/// Fetch and render one card, then save it to `output` or its attachment name.
pub async fn handle(
    request: CardRequest<'_>,
    output: Option<&Path>,
    service: &CardService,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    tracing::debug!(card = %request.kind(), "fetching card");
    let png = request.fetch(service).await?;
    save_png(&target(request, output), &png, global.quiet)
}

/// `GET /v1/test`.
pub async fn test(service: &CardService, global: &GlobalOpts) -> Result<(), CliError> {
    if service.test_connection().await {
        output::success("API connection established", global.quiet);
        Ok(())
    } else {
        Err(CliError::ProbeFailed {
            url: service.api().base_url().to_string(),
        })
    }
}

pub(crate) fn target(request: CardRequest<'_>, output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| PathBuf::from(request.file_name()), Path::to_path_buf)
}

pub(crate) fn save_png(path: &Path, png: &[u8], quiet: bool) -> Result<(), CliError> {
    std::fs::write(path, png)?;
    output::success(&format!("Saved {}", path.display()), quiet);
    Ok(())
}
