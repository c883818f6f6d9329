use crate::util::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLength {
    Short,
    Long,
}

impl ToastLength {
    pub fn seconds(self) -> f64 {
        match self {
            ToastLength::Short => 2.0,
            ToastLength::Long => 3.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    expires_at: f64,
}

/// Transient notifications stacked at the bottom of the window.
#[derive(Debug, Default)]
pub struct Toasts {
    queue: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, length: ToastLength) {
        let message = message.into();
        log::info!("Toast: {}", message.replace('\n', " "));
        self.queue.push(Toast {
            message,
            expires_at: time::current_time_secs() + length.seconds(),
        });
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(|toast| toast.message.as_str())
    }

    pub fn last(&self) -> Option<&str> {
        self.queue.last().map(|toast| toast.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn prune(&mut self, now: f64) {
        self.queue.retain(|toast| toast.expires_at > now);
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        self.prune(time::current_time_secs());
        if self.queue.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -140.0])
            .order(egui::Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.queue {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(toast.message.as_str());
                    });
                }
            });

        // Keep repainting so toasts disappear on time.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
