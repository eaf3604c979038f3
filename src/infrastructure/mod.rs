pub mod config;
pub mod iam_client;
pub mod output;
pub mod password;
