pub mod dock;
pub mod domain;
pub mod merge;
pub mod summarize;
pub mod surface;
