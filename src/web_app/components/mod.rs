// web_app/components/mod.rs - View-facing building blocks
//
// Structure:
// - toast.rs: Transient success/error notifications
// - confirm.rs: Yes/no confirmation prompts

pub mod confirm;
pub mod toast;

pub use confirm::*;
pub use toast::*;
