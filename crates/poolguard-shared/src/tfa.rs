//! Two factor authentication wire types

/// Freshly generated TOTP enrollment material. `image` is a data URI holding
/// the provisioning QR code
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TotpSetup {
    pub secret: String,
    pub image: String,
}

/// Describes the second factor a partially authenticated session must answer
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TfaChallenge {
    pub provider: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TfaEnabled {
    pub enabled: bool,
}
