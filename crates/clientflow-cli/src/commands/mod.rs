pub mod duplicate;
pub mod folders;
pub mod shared;
pub mod templates;
pub mod transfer;
