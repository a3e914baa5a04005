pub mod catalog;
pub mod paths;
pub mod transform;
pub mod wizard;
