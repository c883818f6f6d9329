use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::JoinHandle;

use crate::export::PNG_MIME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAction {
    Send,
}

/// Hand a file to whatever the host offers for sharing.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRequest {
    pub action: ShareAction,
    pub mime: &'static str,
    pub path: PathBuf,
    pub title: String,
}

impl ShareRequest {
    pub fn image_png(path: PathBuf) -> Self {
        Self {
            action: ShareAction::Send,
            mime: PNG_MIME,
            path,
            title: "Share".to_owned(),
        }
    }
}

/// Host share service.
pub trait ShareSheet {
    fn share(&mut self, request: ShareRequest);

    /// Draws the chooser, if the implementation has one.
    fn show(&mut self, _ctx: &egui::Context) {}

    fn is_open(&self) -> bool {
        false
    }
}

/// Opens `path` with the desktop's default handler.
pub fn open_with_system(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut command = Command::new("xdg-open");

    command.arg(path);
    spawn_detached(command).map(|_| ())
}

/// Starts `command` and waits for it on a separate thread so the child is
/// reaped once it exits.
fn spawn_detached(mut command: Command) -> std::io::Result<JoinHandle<()>> {
    let mut child = command.spawn()?;
    let program = command.get_program().to_string_lossy().into_owned();
    std::thread::Builder::new()
        .name("system-open".to_owned())
        .spawn(move || match child.wait() {
            Ok(status) if status.success() => log::debug!("{} finished", program),
            Ok(status) => log::warn!("{} exited with {}", program, status),
            Err(err) => log::warn!("Failed to wait for {}: {}", program, err),
        })
}

/// Small "Share" chooser: copy the file path, or open the file.
#[derive(Debug, Default)]
pub struct DesktopShareSheet {
    pending: Option<ShareRequest>,
}

impl DesktopShareSheet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShareSheet for DesktopShareSheet {
    fn share(&mut self, request: ShareRequest) {
        log::info!(
            "Sharing {} as {} ({:?})",
            request.path.display(),
            request.mime,
            request.action
        );
        self.pending = Some(request);
    }

    fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    fn show(&mut self, ctx: &egui::Context) {
        let Some(request) = &self.pending else {
            return;
        };

        let mut close = false;
        egui::Window::new(request.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(request.path.display().to_string());
                ui.label(format!("Type: {}", request.mime));
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("📋 Copy path").clicked() {
                        ctx.copy_text(request.path.display().to_string());
                        close = true;
                    }
                    if ui.button("🗁 Open").clicked() {
                        if let Err(err) = open_with_system(&request.path) {
                            log::error!("Failed to open {}: {}", request.path.display(), err);
                        }
                        close = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });

        if close {
            self.pending = None;
        }
    }
}
