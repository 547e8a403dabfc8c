mod color;
pub mod commands;

pub use color::Palette;
pub use color::Styled;
