pub mod rpc {
    pub const JSONRPC_VERSION: &str = "2.0";
    pub const REQUEST_ID: u64 = 1;
    pub const API_PATH: &str = "/api_jsonrpc.php";
    pub const LOGIN_METHOD: &str = "user.login";
    pub const LOGOUT_METHOD: &str = "user.logout";
}

pub mod network {
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
    pub const TIMEOUT_ENV: &str = "ZABBIX_HTTP_TIMEOUT_MS";
    pub const USER_AGENT: &str = "zabbix-bridge/0.3";
}

pub mod credentials {
    pub const SESSION: &str = "zabbixApi";
    pub const TOKEN: &str = "zabbixTokenApi";
}

pub mod parameters {
    pub const AUTHENTICATION: &str = "authentication";
    pub const RESOURCE: &str = "resource";
    pub const OPERATION: &str = "operation";
    pub const JSON_PARAMETERS: &str = "jsonParameters";
    pub const ENDPOINT_URL: &str = "endpointUrl";
}

pub mod messages {
    pub const NO_RECORDS: &str = "No records got returned.";
    pub const INVALID_JSON: &str = "Parameters (JSON) must be a valid json";
    pub const NO_CREDENTIALS: &str = "No credentials got returned!";
    pub const LOGIN_FAILED: &str = "Login wasn't successful.";
    pub const LOGOUT_FAILED: &str = "Logout wasn't successful.";
    pub const MALFORMED_RESPONSE: &str = "Response carried neither result nor error";
}

pub mod protocols {
    pub const ALLOWED_HTTP: &[&str] = &["http:", "https:"];
}
