pub mod client;
pub mod query;
mod record;
