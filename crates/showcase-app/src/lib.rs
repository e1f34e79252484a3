//! Showcase Application
//!
//! Scene controllers for the seven interactive examples, the library pages
//! composing them, and the command-line shell that drives pages headlessly.

mod args;
mod config;
mod controller;
mod download;
mod error;
mod library;
mod overview;
mod page;
mod replay;
mod seeds;

pub use args::{Args, Command};
pub use config::{ConfigError, ShowcaseConfig};
pub use controller::{ControllerSettings, HoverState, SceneController};
pub use download::{Download, ExportKind};
pub use error::AppError;
pub use library::{ExampleKind, LibraryProfile};
pub use overview::{Assessment, Criterion, LibraryOverview, Rating, library_report};
pub use page::{Page, SurfaceHost};
pub use replay::{ReplayAction, ReplayScript, run_actions};
pub use seeds::{seed_shapes, text_field_defaults};

use std::path::{Path, PathBuf};

/// Run the command described by `args`.
pub fn run(args: &Args) -> Result<(), AppError> {
    let config = ShowcaseConfig::load(args.config.as_deref())?;
    let out_dir = |out: &Option<PathBuf>| out.clone().unwrap_or_else(|| config.output_dir.clone());

    match &args.command {
        Command::List => {
            print!("{}", index_listing());
            Ok(())
        }
        Command::Info { library } => {
            print!("{}", library_report(*library));
            Ok(())
        }
        Command::Snapshot { library, out } => {
            let host = SurfaceHost::for_profile(*library);
            let mut page: Page = Page::mount(*library, &host, &config)?;
            snapshot_page(&mut page, &out_dir(out))?;
            Ok(())
        }
        Command::Export { library, out } => {
            let host = SurfaceHost::for_profile(*library);
            let mut page: Page = Page::mount(*library, &host, &config)?;
            let dir = out_dir(out);
            for kind in ExportKind::all() {
                let download = page.export(*kind).ok_or_else(|| AppError::ExampleNotMounted {
                    library: library.to_string(),
                    example: ExampleKind::Export.to_string(),
                })?;
                download.save_to(&dir)?;
            }
            Ok(())
        }
        Command::Replay { script, out } => {
            let json = std::fs::read_to_string(script).map_err(|e| AppError::read(script, e))?;
            let script = ReplayScript::from_json(&json)?;
            let host = SurfaceHost::for_profile(script.library);
            let mut page: Page = Page::mount(script.library, &host, &config)?;
            let dir = out_dir(out);
            for download in run_actions(&mut page, &script.actions) {
                download.save_to(&dir)?;
            }
            snapshot_page(&mut page, &dir)?;
            Ok(())
        }
    }
}

/// The index page as text: every library with its examples.
pub fn index_listing() -> String {
    let mut listing = String::from("Design Tools Showcase\nEvaluating graphics libraries for production decision-making\n");
    for profile in LibraryProfile::all() {
        listing.push_str(&format!(
            "\n{} [{}]\n  {}\n  Average rating: {:.2}\n",
            profile.title(),
            profile.name(),
            profile.tagline(),
            profile.overview().average()
        ));
        for example in profile.examples() {
            listing.push_str(&format!("  {}. {}\n", example.number(), example.title()));
        }
    }
    listing
}

/// Write the current frame of every mounted example as `<library>-<n>-<slug>.png`.
pub fn snapshot_page<A: showcase_render::CanvasAdapter>(page: &mut Page<A>, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir).map_err(|e| AppError::write(dir, e))?;
    let library = page.profile().name();
    let mut written = Vec::new();
    for controller in page.controllers_mut() {
        let example = controller.example();
        let Some(image) = controller.snapshot() else {
            continue;
        };
        let path = dir.join(format!("{library}-{}-{}.png", example.number(), example.slug()));
        std::fs::write(&path, &image.png).map_err(|e| AppError::write(&path, e))?;
        log::info!("Wrote {} ({}x{})", path.display(), image.width, image.height);
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_listing() {
        let listing = index_listing();
        assert!(listing.starts_with("Design Tools Showcase"));
        assert!(listing.contains("Konva (react-konva) [konva]"));
        assert!(listing.contains("  7. Export Canvas (Multiple Sizes)"));
        assert!(listing.contains("  Average rating: 4.25\n"));
    }
}
