use anyhow::Result;
use paddyscan_client::{ScannerClient, ScannerConfig};

pub(crate) async fn run(config: ScannerConfig) -> Result<()> {
    let client = ScannerClient::new(&config)?;
    let message = client.health().await?;
    println!("{message}");
    Ok(())
}
