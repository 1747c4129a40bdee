mod text;

pub use text::{ColorMode, Formatter};
