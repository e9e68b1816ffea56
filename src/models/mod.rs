pub mod content;
pub mod enforcement;
pub mod moderation;

pub use content::*;
pub use enforcement::*;
pub use moderation::*;
