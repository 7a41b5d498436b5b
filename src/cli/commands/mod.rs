pub mod config_cmd;
pub mod sessions;
pub mod status;
pub mod summary;
pub mod watch;
