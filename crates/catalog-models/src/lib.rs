pub mod content;
pub mod fields;
pub mod media;

pub use content::ContentRecord;
pub use media::ContentType;
