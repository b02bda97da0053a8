use reqwest::Method;

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    /// Substitutes `id` into the path's `{id}` slot, percent-encoding it so
    /// dataset names and file paths survive interpolation
    pub fn resolve(&self, id: &str) -> String {
        debug_assert!(
            self.path.contains("{id}"),
            "path {:?} has no id slot",
            self.path
        );
        self.path.replace("{id}", &urlencoding::encode(id))
    }
}
