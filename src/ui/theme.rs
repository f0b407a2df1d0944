//! Color decisions and diagnostic styling.

use console::Style;

/// Whether the status mark should carry ANSI colors.
///
/// The mark is usually captured by a shell prompt, so a non-TTY stdout does
/// not disable colors; only `--no-color` and `NO_COLOR` do.
pub fn should_use_colors(no_color_flag: bool) -> bool {
    // https://no-color.org/
    if no_color_flag {
        return false;
    }
    std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
}

/// Format an error line for stderr (`Error: <msg>`, red when stderr is a terminal).
pub fn format_error(msg: &str) -> String {
    let label = Style::new().for_stderr().red().bold().apply_to("Error:");
    format!("{} {}", label, msg)
}
