pub mod compile;
pub mod coverage;
pub mod init_config;
pub mod mutations;
pub mod report;
