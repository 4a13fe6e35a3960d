//! Actions accepted by the global container.

use serde::Deserialize;
use serde_json::Value;

use crate::api::User;
use crate::mvi::Intent;

/// Tagged action.
///
/// The wire form is `{"type": "<tag>", "value": <payload>}` with the tag names
/// the render layer already uses. Any tag not listed here decodes to
/// [`Action::Unknown`], which the reducer treats as identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Action {
    #[serde(rename = "login")]
    Login(User),
    #[serde(rename = "logout")]
    Logout,
    #[serde(rename = "flashMessage")]
    FlashMessage(String),
    #[serde(rename = "openSearch")]
    OpenSearch,
    #[serde(rename = "closeSearch")]
    CloseSearch,
    #[serde(rename = "toggleChat")]
    ToggleChat,
    #[serde(rename = "closeChat")]
    CloseChat,
    #[serde(rename = "incrementUnreadChatCount")]
    IncrementUnread,
    #[serde(rename = "clearUnreadChatCount")]
    ClearUnread,
    #[serde(other)]
    Unknown,
}

impl Intent for Action {}

impl Action {
    pub fn flash(text: impl Into<String>) -> Self {
        Action::FlashMessage(text.into())
    }

    /// Decode the wire form. An unrecognised tag is `Unknown` even when it
    /// carries a payload; malformed JSON or a bad payload for a known tag is
    /// an error.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        match Action::deserialize(&value) {
            Ok(action) => Ok(action),
            Err(err) => {
                let tag = value.get("type").and_then(Value::as_str);
                if tag.is_some_and(|tag| !KNOWN_TAGS.contains(&tag)) {
                    Ok(Action::Unknown)
                } else {
                    Err(err)
                }
            }
        }
    }
}

const KNOWN_TAGS: [&str; 9] = [
    "login",
    "logout",
    "flashMessage",
    "openSearch",
    "closeSearch",
    "toggleChat",
    "closeChat",
    "incrementUnreadChatCount",
    "clearUnreadChatCount",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_unit_tags() {
        assert_eq!(
            Action::from_json(r#"{"type":"toggleChat"}"#).unwrap(),
            Action::ToggleChat
        );
        assert_eq!(
            Action::from_json(r#"{"type":"incrementUnreadChatCount"}"#).unwrap(),
            Action::IncrementUnread
        );
    }

    #[test]
    fn decodes_payload_tags() {
        let action = Action::from_json(r#"{"type":"flashMessage","value":"hi"}"#).unwrap();
        assert_eq!(action, Action::flash("hi"));

        let action = Action::from_json(
            r#"{"type":"login","value":{"token":"t","username":"u","avatar":"a"}}"#,
        )
        .unwrap();
        assert!(matches!(action, Action::Login(user) if user.username == "u"));
    }

    #[test]
    fn unknown_tag_is_not_an_error() {
        let action = Action::from_json(r#"{"type":"somethingNew"}"#).unwrap();
        assert_eq!(action, Action::Unknown);

        let action = Action::from_json(r#"{"type":"somethingNew","value":{"x":1}}"#).unwrap();
        assert_eq!(action, Action::Unknown);
    }

    #[test]
    fn bad_payload_for_known_tag_is_an_error() {
        assert!(Action::from_json(r#"{"type":"login","value":42}"#).is_err());
        assert!(Action::from_json("not json").is_err());
    }
}
