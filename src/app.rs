use std::sync::Arc;

use crate::brush::{BrushSize, BrushState, Palette};
use crate::canvas::CanvasSurface;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::export::{ExportJob, ExportState};
use crate::gallery::{BackgroundImage, DropHandler, ImagePicker, NativeImagePicker};
use crate::input::{InputEvent, InputHandler};
use crate::notify::{ToastLength, Toasts};
use crate::panels::{self, CanvasArea};
use crate::permission::{PendingAction, PermissionFlow, RequestOutcome};
use crate::renderer::Renderer;
use crate::share::{DesktopShareSheet, ShareRequest, ShareSheet};

/// Everything the controls can ask the host to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    Undo,
    Redo,
    OpenBrushPicker,
    CloseBrushPicker,
    SelectBrush(BrushSize),
    SelectColor(usize),
    ImportBackground,
    Save,
    PermissionAnswer(bool),
    DismissRationale,
}

/// User choices remembered between runs.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedSettings {
    brush_size: BrushSize,
    palette_index: usize,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            brush_size: BrushSize::Medium,
            palette_index: 1,
        }
    }
}

/// Host controller: wires the toolbar, palette and dialogs to the canvas and
/// to the host services.
pub struct DrawingApp {
    config: AppConfig,
    canvas: CanvasSurface,
    palette: Palette,
    brush_size: BrushSize,
    background: Option<Arc<BackgroundImage>>,
    permission: PermissionFlow,
    export: ExportState,
    toasts: Toasts,
    brush_picker_open: bool,
    canvas_area: Option<CanvasArea>,
    renderer: Renderer,
    input: InputHandler,
    drops: DropHandler,
    picker: Box<dyn ImagePicker>,
    share_sheet: Box<dyn ShareSheet>,
}

impl DrawingApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self::with_services(
            config,
            Box::new(NativeImagePicker),
            Box::new(DesktopShareSheet::new()),
        );

        if let Some(storage) = cc.storage {
            if let Some(settings) =
                eframe::get_value::<PersistedSettings>(storage, eframe::APP_KEY)
            {
                log::debug!("Restoring settings: {:?}", settings);
                app.select_brush(settings.brush_size);
                app.select_color(settings.palette_index);
            }
        }

        app
    }

    /// Builds the app around the given host services.
    pub fn with_services(
        mut config: AppConfig,
        picker: Box<dyn ImagePicker>,
        share_sheet: Box<dyn ShareSheet>,
    ) -> Self {
        config.brush_sizes = config.brush_sizes.sanitized();
        let palette = Palette::from_tags(&config.palette, config.default_palette_index);
        let brush = BrushState {
            color: palette.selected_color(),
            thickness: config.brush_sizes.thickness(config.default_brush),
        };

        Self {
            canvas: CanvasSurface::new(brush),
            palette,
            brush_size: config.default_brush,
            background: None,
            permission: PermissionFlow::new(),
            export: ExportState::Idle,
            toasts: Toasts::new(),
            brush_picker_open: false,
            canvas_area: None,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            drops: DropHandler::new(),
            picker,
            share_sheet,
            config,
        }
    }

    pub fn apply(&mut self, action: UiAction) {
        log::debug!("UI action: {:?}", action);
        match action {
            UiAction::Undo => {
                self.canvas.undo();
            }
            UiAction::Redo => {
                self.canvas.redo();
            }
            UiAction::OpenBrushPicker => self.brush_picker_open = true,
            UiAction::CloseBrushPicker => self.brush_picker_open = false,
            UiAction::SelectBrush(size) => {
                self.select_brush(size);
                self.brush_picker_open = false;
            }
            UiAction::SelectColor(index) => self.select_color(index),
            UiAction::ImportBackground => self.request_storage(PendingAction::ImportBackground),
            UiAction::Save => {
                if self.export.is_exporting() {
                    log::info!("Save ignored, an export is already running");
                    return;
                }
                self.request_storage(PendingAction::Export);
            }
            UiAction::PermissionAnswer(granted) => self.answer_permission(granted),
            UiAction::DismissRationale => self.permission.dismiss_rationale(),
        }
    }

    pub fn handle_input(&mut self, events: Vec<InputEvent>) {
        for event in events {
            match event {
                InputEvent::PointerDown { pos } => self.canvas.pointer_down(pos),
                InputEvent::PointerMove { pos } => self.canvas.pointer_move(pos),
                InputEvent::PointerUp => {
                    self.canvas.pointer_up();
                }
                InputEvent::Undo => self.apply(UiAction::Undo),
                InputEvent::Redo => self.apply(UiAction::Redo),
                InputEvent::Save => self.apply(UiAction::Save),
            }
        }
    }

    fn select_brush(&mut self, size: BrushSize) {
        let thickness = self.config.brush_sizes.thickness(size);
        if self.canvas.set_brush_thickness(thickness) {
            self.brush_size = size;
        } else {
            log::warn!("Ignoring {} brush with thickness {}", size.label(), thickness);
        }
    }

    fn select_color(&mut self, index: usize) {
        if let Some(color) = self.palette.select(index) {
            self.canvas.set_brush_color(color);
        }
    }

    fn request_storage(&mut self, action: PendingAction) {
        match self.permission.request(action) {
            RequestOutcome::Proceed(action) => self.run(action),
            RequestOutcome::Prompting => {}
            RequestOutcome::ShowRationale => {
                log::info!("Showing storage rationale instead of {:?}", action);
            }
        }
    }

    fn answer_permission(&mut self, granted: bool) {
        match self.permission.resolve(granted) {
            Ok(Some(action)) => {
                self.toasts.show(
                    "Permission granted now you can read the storage files.",
                    ToastLength::Long,
                );
                self.run(action);
            }
            Ok(None) => {}
            Err(err) => self.report(err),
        }
    }

    fn run(&mut self, action: PendingAction) {
        match action {
            PendingAction::ImportBackground => self.import_from_picker(),
            PendingAction::Export => self.start_export(),
        }
    }

    fn import_from_picker(&mut self) {
        let Some(path) = self.picker.pick_image() else {
            log::info!("No picture chosen");
            return;
        };
        match BackgroundImage::load(&path) {
            Ok(background) => self.set_background(background),
            Err(err) => self.report(err.into()),
        }
    }

    pub fn set_background(&mut self, background: BackgroundImage) {
        log::info!("Using background image {:?}", background);
        self.background = Some(Arc::new(background));
    }

    /// Snapshots the view and hands it to a worker for flattening, encoding
    /// and writing.
    fn start_export(&mut self) {
        if self.export.is_exporting() {
            return;
        }

        let snapshot = self.canvas.snapshot(self.background.clone());
        let (width, height) = (snapshot.width, snapshot.height);
        let job = ExportJob::spawn(
            snapshot,
            self.config.cache_dir(),
            self.config.export.file_prefix.clone(),
        );

        match job {
            Ok(job) => {
                log::info!("Export started ({}x{})", width, height);
                self.export = ExportState::Exporting(job);
            }
            Err(err) => {
                self.export = ExportState::Failed(err.to_string());
                self.report(err.into());
            }
        }
    }

    /// Picks up the worker's result once it is ready, then shares the file.
    pub fn poll_export(&mut self) {
        let ExportState::Exporting(job) = &mut self.export else {
            return;
        };
        let Some(result) = job.poll() else {
            return;
        };

        match result {
            Ok(path) => {
                self.toasts.show(
                    format!("File saved successfully at:\n{}", path.display()),
                    ToastLength::Long,
                );
                self.share_sheet.share(ShareRequest::image_png(path.clone()));
                self.export = ExportState::Done(path);
            }
            Err(err) => {
                self.export = ExportState::Failed(err.to_string());
                self.report(err.into());
            }
        }
    }

    fn report(&mut self, err: AppError) {
        let length = match err {
            AppError::PermissionDenied => {
                log::warn!("{}", err);
                ToastLength::Long
            }
            _ => {
                log::error!("{}", err);
                ToastLength::Short
            }
        };
        self.toasts.show(err.user_message(), length);
    }

    /// True while a dialog owns the screen; the canvas ignores new strokes then.
    pub fn is_modal_open(&self) -> bool {
        self.brush_picker_open
            || self.permission.is_prompting()
            || self.permission.rationale_visible()
            || self.export.is_exporting()
            || self.share_sheet.is_open()
    }

    pub fn canvas(&self) -> &CanvasSurface {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasSurface {
        &mut self.canvas
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    pub fn is_brush_picker_open(&self) -> bool {
        self.brush_picker_open
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_deref()
    }

    pub fn permission(&self) -> &PermissionFlow {
        &self.permission
    }

    pub fn export_state(&self) -> &ExportState {
        &self.export
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl eframe::App for DrawingApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings {
            brush_size: self.brush_size,
            palette_index: self.palette.selected_index(),
        };
        eframe::set_value(storage, eframe::APP_KEY, &settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_export();

        // Pointer input is mapped against where the canvas was last frame.
        if let Some(area) = self.canvas_area {
            let accept_new_strokes = area.hovered && !self.is_modal_open();
            let events = self.input.process_input(ctx, area.rect, accept_new_strokes);
            self.handle_input(events);
        }

        let mut actions = Vec::new();
        panels::tools_panel(
            ctx,
            self.canvas.can_undo(),
            self.canvas.can_redo(),
            self.export.is_exporting(),
            &mut actions,
        );
        panels::palette_panel(ctx, &self.palette, &mut actions);
        self.canvas_area = Some(panels::central_panel(
            ctx,
            &mut self.renderer,
            &mut self.canvas,
            self.background.as_deref(),
        ));

        if self.brush_picker_open {
            panels::brush_size_dialog(ctx, &self.config.brush_sizes, self.brush_size, &mut actions);
        }
        if self.permission.is_prompting() {
            panels::permission_prompt(ctx, &self.config.title, &mut actions);
        }
        if self.permission.rationale_visible() {
            panels::rationale_dialog(ctx, &mut actions);
        }
        if self.export.is_exporting() {
            panels::progress_dialog(ctx);
            // Keep polling the worker.
            ctx.request_repaint();
        }
        self.share_sheet.show(ctx);
        self.toasts.ui(ctx);

        self.drops.preview_files_being_dropped(ctx);
        if let Some(result) = self.drops.take_dropped_image(ctx) {
            match result {
                Ok(background) => self.set_background(background),
                Err(err) => self.report(err.into()),
            }
        }

        for action in actions {
            self.apply(action);
        }
    }
}
