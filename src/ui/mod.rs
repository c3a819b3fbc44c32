pub mod layout;
pub mod preview_list;
pub mod status;
pub mod theme;
pub mod tooltip;

pub use layout::{MainLayout, create_main_layout};
pub use preview_list::{
    RowSlot, layout_rows, render_placeholder, render_preview_list, render_scrollbar, row_height,
};
pub use status::{render_header, render_keyboard_hints};
pub use theme::{Theme, ThemeError};
pub use tooltip::render_tooltip;
