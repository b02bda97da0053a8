use crate::{client::NO_ARGS, Client};
use poolguard_shared::const_config::path::{PATH_LOGOUT, PATH_SUPPORT};
use tracing::info;

pub mod data;
pub mod notifications;
pub mod pool;
pub mod tfa;

impl Client {
    /// Ends the session. Local state is cleared unconditionally before the
    /// request goes out and the network outcome is discarded by contract
    #[tracing::instrument]
    pub async fn logout(&self) {
        self.clear_cached_state(); // Clear local state even if the logout request fails
        if let Err(e) = self.send_request_expect_empty(PATH_LOGOUT, &NO_ARGS).await {
            info!("logout request failed: {e:#}");
        }
    }

    /// Plain text support bundle for bug reports
    #[tracing::instrument]
    pub async fn get_support_bundle(&self) -> anyhow::Result<String> {
        self.send_request_expect_text(PATH_SUPPORT, &NO_ARGS).await
    }
}
