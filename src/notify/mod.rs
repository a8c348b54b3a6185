use async_trait::async_trait;

use crate::error::Error;
use crate::usecase::message::Payload;

pub mod slack;

/// Where the rendered report goes.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn post_text(&self, text: &str) -> Result<(), Error>;
    async fn post_payload(&self, payload: &Payload) -> Result<(), Error>;
}
