//! This module stores the expected format of the arguments for the requests.
//! Secrets are kept behind [`SecretString`] and the `Debug` implementations
//! only report whether a secret was supplied, never its value

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

#[derive(Clone, serde::Deserialize)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

#[derive(Clone, serde::Deserialize)]
pub struct LoadKeyReqArgs {
    /// Opaque identifier of the dataset the key belongs to
    pub id: String,
    pub passphrase: SecretString,
}

impl LoadKeyReqArgs {
    pub fn new<S: Into<String>>(id: S, passphrase: SecretString) -> Self {
        Self {
            id: id.into(),
            passphrase,
        }
    }
}

impl Debug for LoadKeyReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadKeyReqArgs")
            .field("id", &self.id)
            .field(
                "has_passphrase",
                &!self.passphrase.expose_secret().is_empty(),
            )
            .finish()
    }
}

#[derive(Clone, serde::Deserialize)]
pub struct TotpSaveReqArgs {
    pub secret: SecretString,
    pub code: String,
}

impl TotpSaveReqArgs {
    pub fn new<S: Into<String>>(secret: SecretString, code: S) -> Self {
        Self {
            secret,
            code: code.into(),
        }
    }
}

impl Debug for TotpSaveReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TotpSaveReqArgs")
            .field("has_secret", &!self.secret.expose_secret().is_empty())
            .field("code", &self.code)
            .finish()
    }
}
