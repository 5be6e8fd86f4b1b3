mod title;
mod tone;

pub use title::{TitleFlasher, FLASH_INTERVAL_MS};
pub use tone::Tone;
