// Service Layer
// Business logic on top of the repositories

pub mod assets;
pub mod backup;
pub mod calendar;
pub mod stats;

pub use assets::AssetDirectory;
