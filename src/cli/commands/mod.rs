pub mod build;
mod command_result;
pub mod context;
pub mod download;
pub mod find_duplicated_lines;
pub mod helper;
pub mod init;
pub mod sync_translations;
pub mod tidy_up;
pub mod validate;

pub use command_result::*;
