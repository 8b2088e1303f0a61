mod central_panel;
mod dialogs;
mod tools_panel;

pub use central_panel::central_panel;
pub use dialogs::{brush_dialog, import_dialog};
pub use tools_panel::tools_panel;
