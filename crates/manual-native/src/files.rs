use manual_core::{
    AtlasProvider, Bitmap, CameraError, FrameGrid, PlaceholderAtlases, Result, SpriteSheet,
};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Decode an image file into an RGBA bitmap.
pub fn load_bitmap(path: &Path) -> Result<Bitmap> {
    let img = image::open(path)
        .map_err(|e| CameraError::MissingResource(format!("{}: {}", path.display(), e)))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Bitmap::from_rgba(w, h, img.into_raw())
}

/// Frame grid for a loaded sheet: an explicit count wins, otherwise the
/// sheet must be an exact grid of frames.
pub fn sheet_grid(
    sheet_width: u32,
    sheet_height: u32,
    frame_width: u32,
    frame_height: u32,
    frames: Option<u32>,
) -> Result<FrameGrid> {
    let frame_count = match frames {
        Some(n) => n,
        None => FrameGrid::guess_frame_count(sheet_width, sheet_height, frame_width, frame_height)
            .ok_or_else(|| {
                CameraError::InvalidGrid(format!(
                    "{}x{} sheet is not a grid of {}x{} frames",
                    sheet_width, sheet_height, frame_width, frame_height
                ))
            })?,
    };
    Ok(FrameGrid {
        frame_width,
        frame_height,
        frame_count,
    })
}

/// Textures from disk where given, procedural placeholders elsewhere.
pub struct FileAtlases {
    pub runner_sheet: Option<PathBuf>,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Option<u32>,
    pub water: Vec<PathBuf>,
    pub fallback: PlaceholderAtlases,
}

impl AtlasProvider for FileAtlases {
    fn runner_sheet(&mut self) -> Result<SpriteSheet> {
        let Some(path) = &self.runner_sheet else {
            return self.fallback.runner_sheet();
        };
        let image = load_bitmap(path)?;
        let grid = sheet_grid(
            image.width(),
            image.height(),
            self.frame_width,
            self.frame_height,
            self.frames,
        )?;
        log::info!(
            "runner sheet {} ({} frames of {}x{})",
            path.display(),
            grid.frame_count,
            grid.frame_width,
            grid.frame_height
        );
        Ok(SpriteSheet {
            image: Rc::new(image),
            grid,
        })
    }

    fn waterfall_layers(&mut self) -> Result<Vec<Rc<Bitmap>>> {
        if self.water.is_empty() {
            return self.fallback.waterfall_layers();
        }
        self.water
            .iter()
            .map(|p| load_bitmap(p).map(Rc::new))
            .collect()
    }
}
