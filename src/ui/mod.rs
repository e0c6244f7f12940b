pub mod diff;
pub mod help;
pub mod progress;
pub mod theme;
pub mod versions;
