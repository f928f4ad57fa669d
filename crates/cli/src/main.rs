//! Command-line driver for one review cycle against a live backend.
//!
//! Usage: `parkwatch <wide.jpg> [zoom.jpg] [--reject]`
//!
//! Submits the wide shot, and if the backend asks for a close-up and
//! one was given, submits it and confirms (or rejects) the resulting
//! decision. Each upload also fetches overlay boxes from `/detect`
//! and writes an annotated copy next to the input.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parkwatch_client::api::ViolationApi;
use parkwatch_client::config::BackendConfig;
use parkwatch_overlay::probe::natural_dimensions;
use parkwatch_overlay::raster::draw_boxes;
use parkwatch_overlay::renderer::DisplayGeometry;
use parkwatch_session::controller::{FirstOutcome, ReviewController, ZoomOutcome};
use parkwatch_session::events::ReviewEvent;

struct Args {
    wide: PathBuf,
    zoom: Option<PathBuf>,
    reject: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut wide = None;
    let mut zoom = None;
    let mut reject = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--reject" => reject = true,
            _ if wide.is_none() => wide = Some(PathBuf::from(arg)),
            _ if zoom.is_none() => zoom = Some(PathBuf::from(arg)),
            other => bail!("Unexpected argument: {other}"),
        }
    }

    let Some(wide) = wide else {
        bail!("Usage: parkwatch <wide.jpg> [zoom.jpg] [--reject]");
    };
    Ok(Args { wide, zoom, reject })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parkwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;
    let config = BackendConfig::from_env();
    tracing::info!(backend = %config.base_url, "Connecting to detection backend");

    let api = ViolationApi::from_config(&config)?;
    let controller = ReviewController::new(api);

    // Mirror review events to the terminal the way a UI would mirror
    // them to its panels.
    let mut events = controller.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ReviewEvent::Message { text, severity } => {
                    println!("[{severity:?}] {text}");
                }
                ReviewEvent::DecisionReady => println!("[decision ready]"),
                ReviewEvent::SessionCleared => println!("[session cleared]"),
                ReviewEvent::CallStarted | ReviewEvent::CallFinished => {}
            }
        }
    });

    let wide_bytes = read_image(&args.wide)?;
    save_annotated(controller.backend(), &args.wide, wide_bytes.clone()).await?;

    let outcome = controller
        .submit_first(wide_bytes, &file_name(&args.wide))
        .await?;

    let FirstOutcome::ZoomRequested { violation_id } = outcome else {
        return Ok(());
    };
    tracing::info!(%violation_id, "Close-up required");

    let Some(zoom_path) = args.zoom else {
        println!("A close-up is required to finish this review; re-run with a zoom image.");
        return Ok(());
    };

    let zoom_bytes = read_image(&zoom_path)?;
    save_annotated(controller.backend(), &zoom_path, zoom_bytes.clone()).await?;

    let outcome = controller
        .submit_zoom(zoom_bytes, &file_name(&zoom_path))
        .await?;

    let ZoomOutcome::ReadyToConfirm(summary) = outcome else {
        return Ok(());
    };

    println!("Driver:    {} ({})", summary.driver.name, summary.plate);
    println!("Vehicle:   {}", summary.driver.vehicle_type);
    println!(
        "Permits:   disabled={} reservation={}",
        summary.driver.disabled_permit, summary.driver.reservation
    );
    println!("Violation: {}", summary.violation_description);
    println!("Fine:      {} KM", summary.violation_fine);

    if args.reject {
        controller.reject().await?;
    } else {
        controller.confirm().await?;
    }
    Ok(())
}

fn read_image(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.jpg".to_string())
}

/// Fetch overlay boxes for the upload and write an annotated copy
/// next to the input (`<name>.overlay.png`).
async fn save_annotated(
    api: &ViolationApi,
    path: &Path,
    bytes: Vec<u8>,
) -> anyhow::Result<()> {
    let detections = api.detect(bytes, &file_name(path)).await?;
    if detections.is_empty() {
        tracing::debug!(path = %path.display(), "No detections to overlay");
        return Ok(());
    }

    let (width, height) = natural_dimensions(path)?;
    let mut annotated = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    draw_boxes(
        &mut annotated,
        &DisplayGeometry::unscaled(width, height),
        &detections,
    )?;

    let out = path.with_extension("overlay.png");
    annotated
        .save(&out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!(overlay = %out.display(), boxes = detections.len(), "Annotated copy written");
    Ok(())
}
