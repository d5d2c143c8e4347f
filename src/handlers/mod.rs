pub mod assets;
pub mod cars;
