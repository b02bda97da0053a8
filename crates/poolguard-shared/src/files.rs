/// One entry of a file browser listing. The entry with type `@` describes the
/// directory being listed itself and carries no HMAC
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileEntry {
    #[serde(rename = "Type")]
    pub kind: String,
    pub name: String,
    #[serde(rename = "HMAC")]
    pub hmac: String,
    pub size: String,
}

impl FileEntry {
    /// Returns `true` if this is the listing header entry (type `@`)
    #[must_use]
    pub fn is_listing_header(&self) -> bool {
        self.kind == "@"
    }
}
