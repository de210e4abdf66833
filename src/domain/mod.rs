pub mod serp_result;
pub mod snapshot;

pub use serp_result::*;
pub use snapshot::*;
