#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod canvas;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod gallery;
pub mod history;
pub mod input;
pub mod notify;
pub mod panels;
pub mod permission;
pub mod raster;
pub mod renderer;
pub mod share;
pub mod stroke;
pub mod util;

pub use app::{DrawingApp, UiAction};
pub use brush::{BrushSize, BrushState, Palette};
pub use canvas::CanvasSurface;
pub use config::AppConfig;
pub use error::AppError;
pub use history::StrokeHistory;
pub use input::{InputEvent, InputHandler};
pub use renderer::Renderer;
pub use stroke::{Stroke, StrokeRef};
