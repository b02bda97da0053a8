use crate::{client::NO_ARGS, Client};
use poolguard_shared::{
    const_config::path::{
        PATH_DATA_INFO, PATH_DATA_MOUNT, PATH_DATA_UNMOUNT, PATH_FILES_BROWSE, PATH_KEY_LOAD,
        PATH_KEY_UNLOAD,
    },
    files::FileEntry,
    pool::Data,
    req_args::LoadKeyReqArgs,
};
use secrecy::ExposeSecret as _;

impl Client {
    /// Dataset or snapshot details, including the keylocation so the load key
    /// action can be conditionally offered
    #[tracing::instrument]
    pub async fn get_data_info(&self, id: &str) -> anyhow::Result<Data> {
        self.send_request_expect_json_at(PATH_DATA_INFO, id, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn mount(&self, id: &str) -> anyhow::Result<String> {
        self.send_request_expect_text_at(PATH_DATA_MOUNT, id, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn unmount(&self, id: &str) -> anyhow::Result<String> {
        self.send_request_expect_text_at(PATH_DATA_UNMOUNT, id, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn load_key(&self, args: LoadKeyReqArgs) -> anyhow::Result<String> {
        let form = [
            ("id", args.id.as_str()),
            ("Passphrase", args.passphrase.expose_secret()),
        ];
        self.send_request_expect_text_at(PATH_KEY_LOAD, &args.id, &form)
            .await
    }

    #[tracing::instrument]
    pub async fn unload_key(&self, id: &str) -> anyhow::Result<String> {
        let form = [("id", id)];
        self.send_request_expect_text_at(PATH_KEY_UNLOAD, id, &form)
            .await
    }

    /// Directory listing. The first entry (type `@`) names the directory that
    /// was listed
    #[tracing::instrument]
    pub async fn browse(&self, id: &str) -> anyhow::Result<Vec<FileEntry>> {
        self.send_request_expect_json_at(PATH_FILES_BROWSE, id, &NO_ARGS)
            .await
    }
}
