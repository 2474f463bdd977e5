use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::Error;

pub type ConfirmFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Completes the SNS subscription handshake.
///
/// Confirmation is best effort: implementations log failures and never
/// report them back. SNS resends the confirmation if it goes unanswered.
pub trait Confirmer: Send + Sync {
    fn confirm<'a>(&'a self, subscribe_url: &'a str) -> ConfirmFuture<'a>;
}

impl<T: Confirmer + ?Sized> Confirmer for std::sync::Arc<T> {
    fn confirm<'a>(&'a self, subscribe_url: &'a str) -> ConfirmFuture<'a> {
        (**self).confirm(subscribe_url)
    }
}

/// Confirms subscriptions with a single GET to the `SubscribeURL`.
pub struct HttpConfirmer {
    client: reqwest::Client,
}

impl HttpConfirmer {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self { client })
    }

    async fn request(&self, subscribe_url: &str) -> Result<(), String> {
        let url = reqwest::Url::parse(subscribe_url).map_err(|e| e.to_string())?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("unexpected status {}", status));
        }

        Ok(())
    }
}

impl Confirmer for HttpConfirmer {
    fn confirm<'a>(&'a self, subscribe_url: &'a str) -> ConfirmFuture<'a> {
        Box::pin(async move {
            match self.request(subscribe_url).await {
                Ok(()) => log::info!("Confirmed subscription {}", subscribe_url),
                Err(e) => log::error!("Error confirming subscription {}: {}", subscribe_url, e),
            }
        })
    }
}
