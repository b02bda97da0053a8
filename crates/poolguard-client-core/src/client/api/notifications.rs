use crate::{client::NO_ARGS, Client};
use poolguard_shared::{
    const_config::path::PATH_NOTIFICATIONS_LIST, notifications::Notification,
};

impl Client {
    /// Notifications most recent first (the server sends oldest first)
    #[tracing::instrument]
    pub async fn get_notifications(&self) -> anyhow::Result<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .send_request_expect_json(PATH_NOTIFICATIONS_LIST, &NO_ARGS)
            .await?;
        notifications.reverse();
        Ok(notifications)
    }
}
