pub mod duplicator;
pub mod organizer;

pub use duplicator::{WorkflowDuplicator, personalize};
