pub mod error;
pub mod local_store;
pub mod record;
pub mod submission_client;
pub mod submission_log;
pub mod validator;
pub mod wizard;
