pub mod conversion;
pub mod loader;
pub mod outcome;
pub mod payload;
pub mod workflow;

pub use conversion::*;
pub use loader::*;
pub use outcome::*;
pub use workflow::*;
