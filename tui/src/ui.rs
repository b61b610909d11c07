mod layout;
mod widgets;

pub use layout::render;
pub use widgets::{
    render_confirmation,
    render_favorites_list,
    render_header,
    render_help_screen,
    render_nav_bar,
    render_quote_card,
    render_status_bar,
};
