//! Utility modules: developer bench logging and the log4rs setup.
pub mod devlog;
pub mod logger;
