pub mod spam;
pub mod time;
