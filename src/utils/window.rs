/// Preview of a text around one position
///
/// See [`window_around`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Window {
    /// Clipped and escaped text
    pub preview: String,
    /// Character offset within `preview` of the requested position
    pub index: usize,
}

/// Clip `text` to `radius` characters on each side of `index`
///
/// Clipped ends are marked with `...`, and `\n`, `\r`, `\t` and `\0` are rendered as escapes
/// so the preview stays on one line. The returned index accounts for both, so a caret can be
/// placed beneath the original position. `index` may equal the text length.
///
/// ```rust
/// let window = fixsnap::utils::window_around("aaaabaaaa", 4, 2).unwrap();
/// assert_eq!(window.preview, "...aabaa...");
/// assert_eq!(window.index, 5);
/// ```
pub fn window_around(text: &str, index: usize, radius: usize) -> crate::Result<Window> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    if index > len {
        return Err(crate::Error::IndexOutOfRange { index, len });
    }

    let start = index.saturating_sub(radius);
    let end = len.min(index.saturating_add(radius).saturating_add(1));

    let mut preview = String::new();
    let mut width = 0;
    if 0 < start {
        preview.push_str(ELLIPSIS);
        width += ELLIPSIS.len();
    }

    let mut preview_index = None;
    for (i, c) in chars.iter().enumerate().take(end).skip(start) {
        if i == index {
            preview_index = Some(width);
        }
        match escape(*c) {
            Some(escaped) => {
                preview.push_str(escaped);
                width += escaped.len();
            }
            None => {
                preview.push(*c);
                width += 1;
            }
        }
    }

    if end < len {
        preview.push_str(ELLIPSIS);
    }

    Ok(Window {
        index: preview_index.unwrap_or(width),
        preview,
    })
}

const ELLIPSIS: &str = "...";

fn escape(c: char) -> Option<&'static str> {
    match c {
        '\n' => Some("\\n"),
        '\r' => Some("\\r"),
        '\t' => Some("\\t"),
        '\0' => Some("\\0"),
        _ => None,
    }
}
