pub mod notice;
pub mod refresh;
pub mod screen;

pub use notice::*;
pub use refresh::*;
pub use screen::*;
