pub mod interjections;
pub mod speakers;
pub mod stopwords;

pub use interjections::*;
pub use speakers::*;
pub use stopwords::*;
