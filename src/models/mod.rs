pub mod debate;
pub mod interjection;
pub mod speaker;
pub mod transcript;

pub use debate::*;
pub use interjection::*;
pub use speaker::*;
pub use transcript::*;
