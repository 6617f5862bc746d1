pub mod answerer;
pub mod chat;
pub mod config;
pub mod extraction;
pub mod session;

pub use answerer::{CorpusIndex, answer};
pub use chat::{ResponseMatcher, ResponseTable};
pub use config::{Config, ConfigBuilder};
pub use extraction::{CorpusCache, ExtractionReport, Extractor};
pub use session::StudySession;
