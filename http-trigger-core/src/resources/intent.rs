use std::{borrow::Cow, str::ParseBoolError};

use thiserror::Error;

use super::{
    annotations::{HOSTNAME_ANNOTATION, PATH_ANNOTATION, TLS_ACME_ANNOTATION},
    crd::v1beta1::function::Function,
};

pub const DEFAULT_DOMAIN: &str = "kubeless.local";
pub const DEFAULT_PATH: &str = "/";

/// Routing a function asks for. Values are used verbatim, no trailing slash
/// or case normalization happens anywhere down the line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerIntent {
    pub host_name: String,
    pub path: String,
    pub tls_acme: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentDefaults {
    pub domain: String,
    pub path: String,
}

impl Default for IntentDefaults {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_owned(),
            path: DEFAULT_PATH.to_owned(),
        }
    }
}

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("Function is missing a name!")]
    MissingFunctionName,
    #[error("Annotation '{}' contains an invalid value! {}", .0, .1)]
    InvalidAnnotation(Cow<'static, str>, ParseBoolError),
}

impl TriggerIntent {
    pub fn new(host_name: impl Into<String>, path: impl Into<String>, tls_acme: bool) -> Self {
        Self {
            host_name: host_name.into(),
            path: path.into(),
            tls_acme,
        }
    }

    /// Reads the routing annotations of a function, filling the gaps with
    /// `<function>.<domain>`, the default path and no ACME.
    pub fn from_function(
        function: &Function,
        defaults: &IntentDefaults,
    ) -> Result<Self, IntentError> {
        let name = function
            .metadata
            .name
            .as_deref()
            .ok_or(IntentError::MissingFunctionName)?;
        let annotations = function.metadata.annotations.as_ref();
        let get_annotation = |key: &str| annotations.and_then(|a| a.get(key));

        let host_name = match get_annotation(HOSTNAME_ANNOTATION) {
            Some(host_name) => host_name.to_owned(),
            None => format!("{name}.{}", defaults.domain),
        };
        let path = get_annotation(PATH_ANNOTATION)
            .cloned()
            .unwrap_or_else(|| defaults.path.clone());
        let tls_acme = match get_annotation(TLS_ACME_ANNOTATION) {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .map_err(|err| IntentError::InvalidAnnotation(TLS_ACME_ANNOTATION.into(), err))?,
            None => false,
        };

        Ok(Self {
            host_name,
            path,
            tls_acme,
        })
    }
}
