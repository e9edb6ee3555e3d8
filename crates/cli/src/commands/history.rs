use anyhow::{Result, bail};
use paddyscan_app::Scanner;
use paddyscan_client::ScannerConfig;

use super::print_lines;

pub(crate) async fn run(config: ScannerConfig, page: i64) -> Result<()> {
    let scanner = Scanner::new(config)?;
    let history = scanner.history_view().await;

    if history.is_loading() {
        let reason = history.last_error().unwrap_or_else(|| "unknown error".to_owned());
        bail!("Could not load history: {reason}");
    }
    let shown = history.set_page(page);
    tracing::debug!(requested = page, shown, "history page selected");
    print_lines(&history.render());
    Ok(())
}
