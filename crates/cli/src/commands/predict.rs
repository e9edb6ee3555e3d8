use anyhow::{Result, anyhow, bail};
use paddyscan_app::{Scanner, SubmitOutcome};
use paddyscan_client::{ImageUpload, ScannerConfig};
use std::path::Path;

use super::print_lines;

pub(crate) async fn run(config: ScannerConfig, path: &Path) -> Result<()> {
    let upload = ImageUpload::from_path(path)
        .await
        .map_err(|e| anyhow!("Failed to read image {}: {e}", path.display()))?;

    let scanner = Scanner::new(config)?;
    let history = scanner.history_view().await;
    let controller = scanner.upload_controller();

    controller.select_file(upload);
    let outcome = controller.submit().await;
    print_lines(&controller.presenter().render());

    match outcome {
        SubmitOutcome::Succeeded => {
            history.settle().await;
            println!();
            println!("Prediction History");
            print_lines(&history.render());
            Ok(())
        },
        SubmitOutcome::Failed(kind) => bail!("Prediction failed: {kind}"),
        SubmitOutcome::NoFile | SubmitOutcome::Busy => bail!("Nothing was submitted"),
    }
}
