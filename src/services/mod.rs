pub mod classifier;
pub mod moderation;
pub mod trust_counters;

pub use classifier::ContentClassifier;
pub use moderation::{ModerationPolicy, ModerationService};
pub use trust_counters::TrustCounters;
