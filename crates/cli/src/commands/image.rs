use anyhow::{Result, anyhow};
use paddyscan_client::{ScannerClient, ScannerConfig};
use std::path::Path;

pub(crate) async fn run(config: ScannerConfig, image_id: &str, output: &Path) -> Result<()> {
    let client = ScannerClient::new(&config)?;
    let bytes = client.fetch_image(image_id).await?;
    tokio::fs::write(output, &bytes)
        .await
        .map_err(|e| anyhow!("Failed to write {}: {e}", output.display()))?;
    println!("Saved {} bytes to {}", bytes.len(), output.display());
    Ok(())
}
