//! Wire types shared by the submitter and the config endpoint

pub mod request;
pub mod response;

pub use request::ConfigUpdate;
pub use response::{ApiMessage, PingResponse, StoredConfig};
