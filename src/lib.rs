pub mod alphabet;
pub mod annealer;
pub mod corpus;
pub mod error;
pub mod hypothesis;
pub mod model;
// cmd and reports belong to the binary (main.rs).
