// Data models shared across repositories, services, and the server

pub mod event;
pub mod settings;
pub mod stats;

pub use event::{Event, EventInput};
pub use settings::{SettingsUpdate, TeamSettings};
pub use stats::{GradeRecord, SeasonStats};
