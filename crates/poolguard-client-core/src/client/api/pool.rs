use crate::{client::NO_ARGS, Client};
use poolguard_shared::{
    const_config::path::{
        PATH_POOL, PATH_POOLS, PATH_POOL_IOSTAT, PATH_POOL_SCRUB_PAUSE, PATH_POOL_SCRUB_START,
        PATH_POOL_TRIM,
    },
    pool::Pool,
};

impl Client {
    #[tracing::instrument]
    pub async fn get_pool(&self, id: &str) -> anyhow::Result<Pool> {
        self.send_request_expect_json_at(PATH_POOL, id, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn get_pools(&self) -> anyhow::Result<Vec<Pool>> {
        self.send_request_expect_json(PATH_POOLS, &NO_ARGS).await
    }

    #[tracing::instrument]
    pub async fn scrub(&self, id: &str) -> anyhow::Result<String> {
        self.send_request_expect_text_at(PATH_POOL_SCRUB_START, id, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn pause_scrub(&self, id: &str) -> anyhow::Result<String> {
        self.send_request_expect_text_at(PATH_POOL_SCRUB_PAUSE, id, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn trim(&self, id: &str) -> anyhow::Result<String> {
        self.send_request_expect_text_at(PATH_POOL_TRIM, id, &NO_ARGS)
            .await
    }

    /// Raw `zpool iostat` output for the pool
    #[tracing::instrument]
    pub async fn iostat(&self, id: &str) -> anyhow::Result<String> {
        self.send_request_expect_text_at(PATH_POOL_IOSTAT, id, &NO_ARGS)
            .await
    }
}
