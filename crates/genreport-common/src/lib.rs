pub mod graph;
pub mod person;
pub mod xref;

pub use graph::*;
pub use person::*;
