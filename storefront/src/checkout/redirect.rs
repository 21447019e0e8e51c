//! Delayed login redirect after an auth failure

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Where the login redirect goes
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}

/// Pending redirect; dropping or cancelling it stops the redirect from firing
#[derive(Debug)]
pub struct LoginRedirect {
    cancel: CancellationToken,
}

impl LoginRedirect {
    /// Spawn a task that calls [`Navigator::to_login`] after `delay`
    ///
    /// Must be called within a Tokio runtime.
    pub fn schedule(navigator: Arc<dyn Navigator>, delay: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("Login redirect cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    tracing::info!("Redirecting to login");
                    navigator.to_login();
                }
            }
        });
        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LoginRedirect {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
