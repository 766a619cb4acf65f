pub mod job;
pub mod preferences;

pub use job::Job;
pub use preferences::Preferences;
