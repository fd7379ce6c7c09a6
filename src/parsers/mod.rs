pub mod html;
pub mod stopwords;
pub mod text;


pub use html::{ParsedPage, extract, parse};
pub use stopwords::StopwordSet;
pub use text::TextNormalizer;
