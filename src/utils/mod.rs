//! Text helpers shared by snapshot comparison and failure reports

mod window;

pub use window::window_around;
pub use window::Window;

/// Line terminator of the host platform
pub const NEWLINE: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Normalize line endings to the host's terminator
///
/// `\r\n` is first collapsed to `\n`, then every `\n` is written as [`NEWLINE`].
/// A lone `\r` is left as is.
pub fn normalize_lines(data: &str) -> String {
    let collapsed = data.replace("\r\n", "\n");
    if NEWLINE == "\n" {
        collapsed
    } else {
        collapsed.replace('\n', NEWLINE)
    }
}

/// Position of the first differing character
///
/// When one text is a prefix of the other, this is the length of the shorter one.
/// Identical texts have no difference.
///
/// ```rust
/// use fixsnap::utils::first_diff_index;
/// assert_eq!(first_diff_index("abc", "abc"), None);
/// assert_eq!(first_diff_index("", "abc"), Some(0));
/// assert_eq!(first_diff_index("aaa", "aaab"), Some(3));
/// ```
pub fn first_diff_index(left: &str, right: &str) -> Option<usize> {
    let mut left_chars = left.chars();
    let mut right_chars = right.chars();
    let mut index = 0;
    loop {
        match (left_chars.next(), right_chars.next()) {
            (Some(l), Some(r)) if l == r => index += 1,
            (None, None) => return None,
            _ => return Some(index),
        }
    }
}
