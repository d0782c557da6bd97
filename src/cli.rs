// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! - Listing filters
//! - Email format checks
//! - Printing the gallery
//! - Running a headless capture session

use snap_gallery::app::{GalleryEntry, PhotoOrigin, UserProfile, is_valid_email};
use snap_gallery::backends::camera::FileSourceCamera;
use snap_gallery::pipelines::photo::ImageFilterTransform;
use snap_gallery::{
    CaptureSession, Config, FilterKind, FilterOutcome, Gallery, PhotoLibrary, PhotoStore,
    ScratchDir, SessionError,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// How a `snap` session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Save the previewed (filtered) photo
    Commit,
    /// Save the unfiltered capture
    CommitOriginal,
    /// Retake: save nothing
    Discard,
}

/// Arguments of the `snap` command
#[derive(Debug)]
pub struct SnapOptions {
    pub source: PathBuf,
    pub email: Option<String>,
    pub front: bool,
    pub filters: Vec<FilterKind>,
    pub finish: Finish,
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// List all filters
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    for filter in FilterKind::ALL {
        println!("  {:<10} {}", filter.id(), filter.display_name());
    }
    Ok(())
}

/// Check an email address, failing when it is invalid
pub fn check_email(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    if is_valid_email(email) {
        println!("Valid email: {}", email);
        Ok(())
    } else {
        Err(format!("Invalid email: {}", email).into())
    }
}

/// Print the gallery as configured (default photos only)
pub fn show_gallery(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let gallery = Gallery::from_config(&config, PhotoStore::new());
    print_gallery(&gallery.entries(), json)
}

/// Run one capture session end to end
///
/// Captures and filter previews go to a scratch folder that is removed when
/// the command ends; only committed photos are copied to the photo folder.
pub fn snap(options: SnapOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();
    if let Some(output) = options.output.clone() {
        config.output_dir = Some(output);
    }

    let mut profile = UserProfile::new();
    if let Some(email) = options.email.as_deref() {
        profile.set_email(email)?;
    }

    let scratch = ScratchDir::create(&Config::scratch_root())?;
    let library = PhotoLibrary::new(config.photos_dir());

    let camera = FileSourceCamera::new(&options.source, scratch.path())?
        .with_access(config.camera_access);
    let transform = ImageFilterTransform::new(scratch.path());
    let store = PhotoStore::new();

    let session = CaptureSession::with_options(
        Arc::new(camera),
        Arc::new(transform),
        store.clone(),
        (&config).into(),
    );

    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(async {
        run_session(&session, &options).await?;
        let saved = library.save_all(&store).await?;
        Ok::<_, Box<dyn std::error::Error>>(saved)
    });
    // Runtime shutdown waits for cancelled transforms still writing to scratch
    drop(rt);
    drop(scratch);
    let saved = saved?;

    for photo in saved.snapshot() {
        println!("Saved: {}", photo);
    }
    if let Some(email) = profile.email() {
        println!("User: {}", email);
    }

    let gallery = Gallery::from_config(&config, saved);
    print_gallery(&gallery.entries(), options.json)
}

async fn run_session(
    session: &CaptureSession,
    options: &SnapOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    session.request_permission().await?;

    if options.front {
        let facing = session.toggle_facing()?;
        println!("Camera: {}", facing);
    }

    let staged = session.capture().await?;
    println!("Captured: {}", staged);

    for filter in &options.filters {
        match session.select_filter(*filter).await {
            Ok(FilterOutcome::Applied(photo)) => {
                println!("Filter {}: {}", filter.display_name(), photo);
            }
            Ok(FilterOutcome::Superseded) => {}
            Err(e @ SessionError::FilterFailed { .. }) => {
                // Preview keeps the previous filter
                warn!(error = %e, "Continuing without filter");
                eprintln!("{}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    match options.finish {
        Finish::Commit => println!("Committed: {}", session.commit()?),
        Finish::CommitOriginal => println!("Committed original: {}", session.commit_original()?),
        Finish::Discard => println!("Discarded: {}", session.discard()?),
    }

    Ok(())
}

fn print_gallery(entries: &[GalleryEntry], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Gallery is empty.");
        return Ok(());
    }

    println!("Gallery ({} photos):", entries.len());
    for entry in entries {
        let tag = match entry.origin {
            PhotoOrigin::Default => " (default)",
            PhotoOrigin::Captured => "",
        };
        println!("  [{}] {}{}", entry.index, entry.photo, tag);
    }
    Ok(())
}
