pub mod result_store;
pub mod scheduler;
pub mod search_provider;
pub mod serp_analyzer;
pub mod serp_extractor;
pub mod title_analyzer;

pub use result_store::*;
pub use scheduler::*;
pub use search_provider::*;
pub use serp_analyzer::*;
pub use serp_extractor::*;
pub use title_analyzer::*;
