pub const HOSTNAME_ANNOTATION: &str = "kubeless.io/http-trigger-hostname";
pub const PATH_ANNOTATION: &str = "kubeless.io/http-trigger-path";
pub const TLS_ACME_ANNOTATION: &str = "kubeless.io/http-trigger-tls-acme";
