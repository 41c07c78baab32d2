pub mod cover;
pub mod gradient;
pub mod heat_map;
pub mod search_line;

pub use cover::Cover;
pub use heat_map::HeatMap;
pub use search_line::SearchLine;
