//! Stores settings that are not expected to need to change but grouped
//! together for discoverability and reuse. Each constant is prefixed by the
//! module name to allow importing the constant only and still be readable

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    pub const PATH_AUTHENTICATE: PathSpec = PathSpec::post("/api/v0/authenticate");
    pub const PATH_LOGOUT: PathSpec = PathSpec::post("/api/v0/logout");
    pub const PATH_INFO: PathSpec = PathSpec::get("/api/v0/info");
    pub const PATH_SUPPORT: PathSpec = PathSpec::get("/api/v0/support");

    pub const PATH_POOLS: PathSpec = PathSpec::get("/api/v0/pools");
    pub const PATH_POOL: PathSpec = PathSpec::get("/api/v0/pool/{id}");
    pub const PATH_POOL_SCRUB_START: PathSpec = PathSpec::post("/api/v0/pool/{id}/scrub/start");
    pub const PATH_POOL_SCRUB_PAUSE: PathSpec = PathSpec::post("/api/v0/pool/{id}/scrub/pause");
    pub const PATH_POOL_TRIM: PathSpec = PathSpec::post("/api/v0/pool/{id}/trim");
    pub const PATH_POOL_IOSTAT: PathSpec = PathSpec::get("/api/v0/pool/{id}/iostat");

    pub const PATH_PROPERTIES: PathSpec = PathSpec::get("/api/v0/properties/{id}");

    pub const PATH_DATA_INFO: PathSpec = PathSpec::get("/api/v0/data/{id}/info");
    pub const PATH_DATA_MOUNT: PathSpec = PathSpec::post("/api/v0/data/{id}/mount");
    pub const PATH_DATA_UNMOUNT: PathSpec = PathSpec::post("/api/v0/data/{id}/unmount");
    pub const PATH_KEY_LOAD: PathSpec = PathSpec::post("/api/v0/key/{id}/load");
    pub const PATH_KEY_UNLOAD: PathSpec = PathSpec::post("/api/v0/key/{id}/unload");

    pub const PATH_FILES_BROWSE: PathSpec = PathSpec::get("/api/v0/files/browse/{id}");

    pub const PATH_NOTIFICATIONS_LIST: PathSpec = PathSpec::get("/api/v0/notifications/list");

    pub const PATH_TFA_CHALLENGE: PathSpec = PathSpec::get("/api/v0/tfa/challenge");
    pub const PATH_TFA_ENABLED: PathSpec = PathSpec::get("/api/v0/tfa/enabled");
    pub const PATH_TFA_TOTP_INITIALIZE: PathSpec = PathSpec::get("/api/v0/tfa/totp/initialize");
    pub const PATH_TFA_TOTP_SAVE: PathSpec = PathSpec::post("/api/v0/tfa/totp/save");
    pub const PATH_TFA_TOTP_AUTHENTICATE: PathSpec =
        PathSpec::post("/api/v0/tfa/totp/authenticate");
}
