use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Everything except GET sends `data` as a JSON body; GET sends it as a query string.
    pub fn is_body_bearing(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// The endpoint dropdown value, `"METHOD /path"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSelector {
    pub method: HttpMethod,
    pub path: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Expected \"METHOD /path\", got \"{0}\"")]
    Malformed(String),

    #[error(transparent)]
    Method(#[from] UnknownMethod),
}

impl FromStr for EndpointSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((method, path)) = trimmed.split_once(char::is_whitespace) else {
            return Err(SelectorError::Malformed(trimmed.to_string()));
        };

        let path = path.trim_start();
        if !path.starts_with('/') || path.contains(char::is_whitespace) {
            return Err(SelectorError::Malformed(trimmed.to_string()));
        }

        let method = method.parse()?;

        Ok(Self {
            method,
            path: path.to_string(),
        })
    }
}

impl fmt::Display for EndpointSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Raw form state as the user typed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitInput {
    pub endpoint: String,
    #[serde(default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selector_value() {
        let selector: EndpointSelector = "POST /campaign/switch/domain".parse().unwrap();
        assert_eq!(selector.method, HttpMethod::Post);
        assert_eq!(selector.path, "/campaign/switch/domain");
        assert_eq!(selector.to_string(), "POST /campaign/switch/domain");
    }

    #[test]
    fn method_is_case_insensitive() {
        let selector: EndpointSelector = "get  /offer/list".parse().unwrap();
        assert_eq!(selector.method, HttpMethod::Get);
        assert_eq!(selector.path, "/offer/list");
    }

    #[test]
    fn rejects_selector_without_path() {
        assert!(matches!(
            "GET".parse::<EndpointSelector>(),
            Err(SelectorError::Malformed(_))
        ));
        assert!(matches!(
            "GET offer".parse::<EndpointSelector>(),
            Err(SelectorError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_unknown_method() {
        assert_eq!(
            "FETCH /offer".parse::<EndpointSelector>(),
            Err(SelectorError::Method(UnknownMethod("FETCH".to_string())))
        );
    }

    #[test]
    fn only_get_is_not_body_bearing() {
        assert!(!HttpMethod::Get.is_body_bearing());
        for method in [
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
        ] {
            assert!(method.is_body_bearing(), "{method}");
        }
    }
}
