//! Renders toarudeco's shadow and decorations to PNG files.
//!
//! Usage: `toarudeco-preview [out_dir] [theme]`
//!
//! Writes `shadow.png`, `active.png`, `inactive.png` and `buttons.png` to
//! `out_dir` (default: the current directory), using `theme` (default:
//! Light). Set `RUST_LOG` to see what is going on.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tiny_skia::Pixmap;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt as logger, EnvFilter};

use strum::IntoEnumIterator;

use toarudeco::config::{DecorationConfig, DecorationSettings, Theme, NO_CHECKS};
use toarudeco::paint::SkiaPainter;
use toarudeco::types::{Rect, Size};
use toarudeco::window::{ButtonKind, Capabilities, WindowEvent, WindowState};
use toarudeco::{DecoError, Decoration, DecorationElement, DecorationManager};

const FRAME: Duration = Duration::from_millis(16);
const BUTTON_SIZE: i32 = 40;

fn pixmap(size: Size<i32, toarudeco::types::Logical>, scale: f32) -> Result<Pixmap, DecoError> {
    let width = (size.width.max(1) as f32 * scale).ceil() as u32;
    let height = (size.height.max(1) as f32 * scale).ceil() as u32;
    Pixmap::new(width, height).ok_or(DecoError::Allocation { width, height })
}

fn render(deco: &Decoration, scale: f32, path: &Path) -> Result<(), Box<dyn Error + Send + Sync>> {
    let size = deco.computed_size();
    let mut canvas = pixmap(size, scale)?;
    {
        let mut painter = SkiaPainter::new(&mut canvas, scale);
        deco.paint(&mut painter, Rect::from_size(size));
    }
    canvas.save_png(path)?;
    info!("wrote {}", path.display());
    Ok(())
}

fn render_buttons(manager: &DecorationManager, scale: f32, path: &Path) -> Result<(), Box<dyn Error + Send + Sync>> {
    let kinds: Vec<ButtonKind> = ButtonKind::iter().collect();
    let size = Size::new(BUTTON_SIZE * kinds.len() as i32, BUTTON_SIZE);
    let mut canvas = pixmap(size, scale)?;
    {
        let mut painter = SkiaPainter::new(&mut canvas, scale);
        for (i, kind) in kinds.into_iter().enumerate() {
            let rect = Rect::new(i as i32 * BUTTON_SIZE, 0, BUTTON_SIZE, BUTTON_SIZE);
            let button = manager.create_standalone_button(kind, rect);
            button.paint(&mut painter, rect);
        }
    }
    canvas.save_png(path)?;
    info!("wrote {}", path.display());
    Ok(())
}

pub fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    logger::fmt()
        .with_env_filter(EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy())
        // don't use timestamps
        .without_time()
        // don't show source filename
        .with_file(false)
        // don't show source code line
        .with_line_number(false)
        .try_init()?;

    let mut args = std::env::args().skip(1);
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let theme = match args.next() {
        Some(name) => name.parse::<Theme>().map_err(|_| DecoError::InvalidConfig(format!("unknown theme {name:?}")))?,
        None => Theme::default(),
    };
    std::fs::create_dir_all(&out_dir)?;

    let config = DecorationConfig::builder().theme(theme).finish(NO_CHECKS)?;
    let settings = DecorationSettings::default();
    let scale = settings.device_pixel_ratio;
    let mut manager = DecorationManager::new(config, settings);

    let window = WindowState::new(480, "toarudeco preview", Capabilities::all()).with_height(240);
    let inactive = manager.create_decoration(window.clone());
    let mut active = manager.create_decoration(window);
    active.on_window_state_changed(WindowEvent::ActiveChanged(true));
    while active.tick(FRAME) {}

    match inactive.shadow().texture.as_ref() {
        Some(texture) => {
            let path = out_dir.join("shadow.png");
            texture.save_png(&path)?;
            info!("wrote {}", path.display());
        }
        None => info!("no shadow configured"),
    }

    render(&inactive, scale, &out_dir.join("inactive.png"))?;
    render(&active, scale, &out_dir.join("active.png"))?;
    render_buttons(&manager, scale, &out_dir.join("buttons.png"))?;

    drop(inactive);
    drop(active);
    manager.teardown();
    Ok(())
}
