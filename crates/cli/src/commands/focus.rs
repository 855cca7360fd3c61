use earthcall::providers::{focus_window, system_windows};
use earthcall::Result;
use tracing::info;

pub async fn execute(title_part: &str) -> Result<()> {
    info!(target = "ec", %title_part, "focus window");

    let provider = system_windows();
    let title = focus_window(&provider, title_part).await?;

    println!("Focused window: {title}");
    Ok(())
}
