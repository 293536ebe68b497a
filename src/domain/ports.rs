use std::collections::BTreeMap;
use std::time::Duration;

/// Everything the request executor needs to know about where and how to call.
pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn bearer_token(&self) -> Option<&str>;
    fn timeout(&self) -> Option<Duration>;
    fn extra_headers(&self) -> &BTreeMap<String, String>;
}
