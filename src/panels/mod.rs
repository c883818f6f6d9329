mod central_panel;
mod dialogs;
mod palette_panel;
mod tools_panel;

pub use central_panel::{CanvasArea, central_panel};
pub use dialogs::{brush_size_dialog, permission_prompt, progress_dialog, rationale_dialog};
pub use palette_panel::palette_panel;
pub use tools_panel::tools_panel;
