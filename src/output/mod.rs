pub mod formatter;

pub use formatter::{
    format_board_table, format_disclaimer, format_editors, format_level_list, format_user_detail,
    localize, should_use_colors,
};
