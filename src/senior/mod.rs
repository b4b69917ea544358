//! Senior ERP budget grid web service integration

pub mod client;
pub mod dry_run;
pub mod envelope;
pub mod response;

pub use client::SoapClient;
pub use dry_run::EnvelopeDirWriter;
