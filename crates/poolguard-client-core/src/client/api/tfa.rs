use crate::{client::NO_ARGS, Client};
use poolguard_shared::{
    const_config::path::{
        PATH_TFA_CHALLENGE, PATH_TFA_ENABLED, PATH_TFA_TOTP_AUTHENTICATE,
        PATH_TFA_TOTP_INITIALIZE, PATH_TFA_TOTP_SAVE,
    },
    req_args::TotpSaveReqArgs,
    tfa::{TfaChallenge, TfaEnabled, TotpSetup},
};
use secrecy::ExposeSecret as _;

impl Client {
    /// Second factor a partially authenticated session must answer
    #[tracing::instrument]
    pub async fn get_two_factor_challenge(&self) -> anyhow::Result<TfaChallenge> {
        self.send_request_expect_json(PATH_TFA_CHALLENGE, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn totp_is_enabled(&self) -> anyhow::Result<bool> {
        let TfaEnabled { enabled } = self
            .send_request_expect_json(PATH_TFA_ENABLED, &NO_ARGS)
            .await?;
        Ok(enabled)
    }

    /// Generates fresh enrollment material. Nothing is stored server side
    /// until [`Self::totp_save`] confirms it with a valid code
    #[tracing::instrument]
    pub async fn totp_initialize(&self) -> anyhow::Result<TotpSetup> {
        self.send_request_expect_json(PATH_TFA_TOTP_INITIALIZE, &NO_ARGS)
            .await
    }

    #[tracing::instrument]
    pub async fn totp_save(&self, args: TotpSaveReqArgs) -> anyhow::Result<()> {
        let form = [
            ("secret", args.secret.expose_secret()),
            ("code", args.code.as_str()),
        ];
        self.send_request_expect_empty(PATH_TFA_TOTP_SAVE, &form)
            .await
    }

    /// Answers the TOTP challenge of a partially authenticated session. On
    /// success the session level changed, so cached state is dropped
    #[tracing::instrument]
    pub async fn totp_authenticate(&self, code: &str) -> anyhow::Result<()> {
        let form = [("code", code)];
        self.send_request_expect_empty(PATH_TFA_TOTP_AUTHENTICATE, &form)
            .await?;
        self.clear_cached_state();
        Ok(())
    }
}
