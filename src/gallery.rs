use egui::{ColorImage, Pos2, Rect, Vec2};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tiny_skia::{IntSize, Pixmap};

// Static counter for telling imported pictures apart
static NEXT_BACKGROUND_ID: AtomicU64 = AtomicU64::new(1);

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has no pixels")]
    Empty,
    #[error("Dropped file is not a supported image: {0}")]
    Unsupported(String),
}

/// A decoded picture shown behind the drawing.
#[derive(Clone)]
pub struct BackgroundImage {
    id: u64,
    size: [usize; 2],
    // Straight (non-premultiplied) RGBA
    rgba: Vec<u8>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("id", &self.id)
            .field("size", &self.size)
            .finish()
    }
}

impl BackgroundImage {
    pub fn from_rgba(size: [usize; 2], rgba: Vec<u8>) -> Result<Self, ImportError> {
        if size[0] == 0 || size[1] == 0 || rgba.len() != size[0] * size[1] * 4 {
            return Err(ImportError::Empty);
        }
        Ok(Self {
            id: NEXT_BACKGROUND_ID.fetch_add(1, Ordering::Relaxed),
            size,
            rgba,
        })
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ImportError> {
        let img = image::load_from_memory(bytes)?;
        log::debug!("Decoded background image: {}x{}", img.width(), img.height());
        let rgba = img.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        Self::from_rgba(size, rgba.into_raw())
    }

    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let bytes = std::fs::read(path).map_err(|source| ImportError::Io {
            path: path.to_owned(),
            source,
        })?;
        log::info!("Loading background from {} ({} bytes)", path.display(), bytes.len());
        Self::decode(&bytes)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn size(&self) -> [usize; 2] {
        self.size
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(self.size, &self.rgba)
    }

    pub fn to_pixmap(&self) -> Option<Pixmap> {
        let size = IntSize::from_wh(self.size[0] as u32, self.size[1] as u32)?;
        let premultiplied = self
            .rgba
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3] as u16;
                let mul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
                [mul(px[0]), mul(px[1]), mul(px[2]), px[3]]
            })
            .collect();
        Pixmap::from_vec(premultiplied, size)
    }

    /// Scale and offset that make the picture cover a `width`x`height` area
    /// while keeping its aspect ratio.
    pub fn center_crop_transform(&self, width: f32, height: f32) -> (f32, f32, f32) {
        let (iw, ih) = (self.size[0] as f32, self.size[1] as f32);
        let scale = (width / iw).max(height / ih);
        let tx = (width - iw * scale) / 2.0;
        let ty = (height - ih * scale) / 2.0;
        (scale, tx, ty)
    }

    /// Texture coordinates of the part of the picture visible in a `target`
    /// sized area under center-crop scaling.
    pub fn center_crop_uv(&self, target: Vec2) -> Rect {
        let image_aspect = self.size[0] as f32 / self.size[1] as f32;
        let target_aspect = target.x / target.y;
        if !target_aspect.is_finite() || target_aspect <= 0.0 {
            return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        }

        if image_aspect > target_aspect {
            let w = target_aspect / image_aspect;
            Rect::from_min_max(Pos2::new((1.0 - w) / 2.0, 0.0), Pos2::new((1.0 + w) / 2.0, 1.0))
        } else {
            let h = image_aspect / target_aspect;
            Rect::from_min_max(Pos2::new(0.0, (1.0 - h) / 2.0), Pos2::new(1.0, (1.0 + h) / 2.0))
        }
    }
}

/// Where gallery imports come from.
pub trait ImagePicker {
    /// Lets the user choose a picture. `None` means the user cancelled.
    fn pick_image(&mut self) -> Option<PathBuf>;
}

/// Native open dialog filtered to image files.
#[derive(Debug, Default)]
pub struct NativeImagePicker;

impl ImagePicker for NativeImagePicker {
    fn pick_image(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Choose a picture")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Picks up image files dropped onto the window.
#[derive(Debug, Default)]
pub struct DropHandler;

impl DropHandler {
    pub fn new() -> Self {
        Self
    }

    /// Decodes the first dropped file of this frame, if any.
    pub fn take_dropped_image(&self, ctx: &egui::Context) -> Option<Result<BackgroundImage, ImportError>> {
        let file = ctx.input(|i| i.raw.dropped_files.first().cloned())?;

        let name = match &file.path {
            Some(path) => path.display().to_string(),
            None if !file.name.is_empty() => file.name.clone(),
            None => "unknown".to_owned(),
        };

        let is_image = if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else {
            file.path.as_deref().is_some_and(has_image_extension)
        };
        if !is_image {
            log::warn!("Dropped file is not a supported type: {}", name);
            return Some(Err(ImportError::Unsupported(name)));
        }

        if let Some(bytes) = &file.bytes {
            log::info!("Processing dropped image from memory: {} ({} bytes)", name, bytes.len());
            Some(BackgroundImage::decode(bytes))
        } else if let Some(path) = &file.path {
            Some(BackgroundImage::load(path))
        } else {
            log::warn!("Dropped file has no accessible data: {}", name);
            None
        }
    }

    /// Dims the window while files are hovering over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop a picture to use it as background",
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}
