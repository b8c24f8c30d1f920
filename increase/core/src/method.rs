//! HTTP verbs used by the Increase API.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods issued by the client.
///
/// The API only uses four verbs: reads are `GET`, creates and actions are
/// `POST`, updates are `PATCH` and removals are `DELETE`.
///
/// ## Examples
///
/// ```rust
/// use increase_core::RestMethod;
///
/// let method: RestMethod = "PATCH".parse().unwrap();
/// assert_eq!(method, RestMethod::Patch);
/// assert!(method.has_body());
/// assert!(!RestMethod::Get.has_body());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// Retrieve a resource or a list.
    Get,
    /// Create a resource or trigger an action on it.
    Post,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl RestMethod {
    /// Returns `true` if requests with this method may carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }

    /// Returns `true` if this method is read-only.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_parse_rejects_unknown_verb() {
        assert!("PUT".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_body_and_safety() {
        assert!(RestMethod::Post.has_body());
        assert!(RestMethod::Patch.has_body());
        assert!(!RestMethod::Delete.has_body());
        assert!(RestMethod::Get.is_safe());
        assert!(!RestMethod::Post.is_safe());
    }

    #[test]
    fn test_reqwest_conversion_covers_every_verb() {
        for method in RestMethod::iter() {
            let converted: reqwest::Method = method.into();
            assert_eq!(converted.as_str(), method.to_string());
        }
    }
}
