/// Response of the info endpoint. The build details are only included by the
/// server for authenticated sessions so they are optional here
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionInfo {
    pub product: String,
    pub authenticated: bool,
    #[serde(default)]
    pub debug: bool,
    #[serde(rename = "ZFSVersion", default, skip_serializing_if = "Option::is_none")]
    pub zfs_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_time: Option<String>,
}
