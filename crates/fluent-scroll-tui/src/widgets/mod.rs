mod document;
mod picker;
mod popup;
mod status_bar;

pub use document::DocumentWidget;
pub use picker::PickerWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
