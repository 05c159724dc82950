//! User API group
//!
//! Objects mirror the remote "user" reference schema. Every field the API
//! sends as a string is an `Option<String>` here and is skipped when unset,
//! so the same structs work for both reading and writing.

use crate::ZbxClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zbx_core::{codec, Error, JsonRpcRequest, Result, DEFAULT_ID};

const USER_LOGIN: &str = "user.login";
const USER_LOGOUT: &str = "user.logout";
const USER_GET: &str = "user.get";
const USER_CHECK_AUTHENTICATION: &str = "user.checkAuthentication";

/// User object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "userid", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passwd: Option<String>,
    #[serde(rename = "roleid", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_clock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_failed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autologin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autologout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_per_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts_provisioned: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "userdirectoryid", skip_serializing_if = "Option::is_none")]
    pub user_directory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Present when requested with `selectMedias`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medias: Option<Vec<Media>>,
}

/// Media object attached to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "mediatypeid", skip_serializing_if = "Option::is_none")]
    pub media_type_id: Option<String>,
    #[serde(rename = "sendto", skip_serializing_if = "Option::is_none")]
    pub send_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(rename = "userdirectory_mediaid", skip_serializing_if = "Option::is_none")]
    pub user_directory_media_id: Option<String>,
}

/// Parameters of `user.login`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Ask for the full user and session object instead of a bare token
    #[serde(rename = "userData", skip_serializing_if = "std::ops::Not::not")]
    pub user_data: bool,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            user_data: false,
        }
    }

    pub fn with_user_data(mut self, user_data: bool) -> Self {
        self.user_data = user_data;
        self
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_data", &self.user_data)
            .finish()
    }
}

/// Result of `user.login` and `user.checkAuthentication`
///
/// The authenticated user's profile is flattened into the same object as
/// the session fields. Session fields that are absent or `null` keep their
/// default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub user_type: i64,
    #[serde(rename = "userip", deserialize_with = "null_as_default")]
    pub user_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub debug_mode: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub gui_access: String,
    #[serde(rename = "mfaid", deserialize_with = "null_as_default")]
    pub mfa_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub deprovisioned: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub auth_type: i64,
    #[serde(rename = "sessionid", deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub secret: String,
    #[serde(flatten)]
    pub user: User,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl LoginResponse {
    /// Decode a login result in either of its two shapes
    ///
    /// With `userData` the server answers with the full object; without it,
    /// or on servers configured to do so, the result is the bare session id.
    /// In the string case every other field keeps its default.
    pub fn from_result(result: Value) -> Result<Self> {
        match result {
            Value::Object(_) => codec::decode_result(result),
            Value::String(session_id) => Ok(Self {
                session_id,
                ..Default::default()
            }),
            other => Err(Error::Decode(format!(
                "unexpected login result shape: {}",
                other
            ))),
        }
    }
}

/// Parameters of `user.get`
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserGetParams {
    /// `"extend"` or a list of property names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(rename = "userids", skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<String>>,
    /// `"extend"` or a list of media property names
    #[serde(rename = "selectMedias", skip_serializing_if = "Option::is_none")]
    pub select_medias: Option<Value>,
    /// Exact-match filter, e.g. `{"username": ["Admin"]}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Handle for the user API group
///
/// Borrowed from a [`ZbxClient`] via [`ZbxClient::user`]; holds no state of
/// its own.
pub struct UserApi<'a> {
    client: &'a ZbxClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(client: &'a ZbxClient) -> Self {
        Self { client }
    }

    /// Log in and return the session token with the decoded login info
    ///
    /// `id` defaults to 1. The token is not stored on the client; use
    /// [`ZbxClient::login`] for that.
    #[tracing::instrument(skip(self, request))]
    pub async fn login(
        &self,
        request: &LoginRequest,
        id: Option<i64>,
    ) -> Result<(String, LoginResponse)> {
        let request = JsonRpcRequest::with_params(USER_LOGIN, request, id.unwrap_or(DEFAULT_ID))?;
        let result = self.client.execute(request).await?;
        let info = LoginResponse::from_result(result)?;
        Ok((info.session_id.clone(), info))
    }

    /// End the current session on the server
    pub async fn logout(&self) -> Result<bool> {
        self.client.call(USER_LOGOUT, Value::Array(Vec::new())).await
    }

    /// Retrieve users
    pub async fn get(&self, params: &UserGetParams) -> Result<Vec<User>> {
        self.client.call(USER_GET, params).await
    }

    /// Look up the session behind a session id
    pub async fn check_authentication(&self, session_id: &str) -> Result<LoginResponse> {
        let params = serde_json::json!({ "sessionid": session_id });
        let request = JsonRpcRequest::new(USER_CHECK_AUTHENTICATION, params, DEFAULT_ID);
        let result = self.client.execute(request).await?;
        LoginResponse::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_result_object_decodes_all_fields() {
        let result = json!({
            "userid": "1",
            "username": "Admin",
            "name": "Zabbix",
            "surname": "Administrator",
            "url": "",
            "autologin": "1",
            "autologout": "0",
            "lang": "en_US",
            "refresh": "0s",
            "theme": "default",
            "attempt_failed": "0",
            "attempt_ip": "127.0.0.1",
            "attempt_clock": "1355919038",
            "rows_per_page": "50",
            "timezone": "Europe/Riga",
            "roleid": "3",
            "userdirectoryid": "0",
            "ts_provisioned": "0",
            "type": 3,
            "userip": "127.0.0.1",
            "debug_mode": 0,
            "gui_access": "0",
            "mfaid": 0,
            "deprovisioned": false,
            "auth_type": 0,
            "sessionid": "5b56eee8be445e98f0bd42b435736e42",
            "secret": "cd0ba923319741c6586f3d866423a8f4"
        });

        let info = LoginResponse::from_result(result).unwrap();

        assert_eq!(info.session_id, "5b56eee8be445e98f0bd42b435736e42");
        assert_eq!(info.secret, "cd0ba923319741c6586f3d866423a8f4");
        assert_eq!(info.user_type, 3);
        assert_eq!(info.user_ip, "127.0.0.1");
        assert_eq!(info.gui_access, "0");
        assert!(!info.deprovisioned);
        assert_eq!(info.user.user_id.as_deref(), Some("1"));
        assert_eq!(info.user.username.as_deref(), Some("Admin"));
        assert_eq!(info.user.surname.as_deref(), Some("Administrator"));
        assert_eq!(info.user.role_id.as_deref(), Some("3"));
        assert_eq!(info.user.timezone.as_deref(), Some("Europe/Riga"));
        assert_eq!(info.user.url.as_deref(), Some(""));
    }

    #[test]
    fn test_login_result_string_sets_only_session_id() {
        let info = LoginResponse::from_result(json!("0424bd59b807674191e7d77572075f33")).unwrap();

        assert_eq!(
            info,
            LoginResponse {
                session_id: "0424bd59b807674191e7d77572075f33".to_string(),
                ..Default::default()
            }
        );
        assert_eq!(info.user, User::default());
    }

    #[test]
    fn test_login_result_null_fields_keep_defaults() {
        let info = LoginResponse::from_result(json!({
            "sessionid": "abc",
            "userid": "7",
            "type": null,
            "userip": null,
            "deprovisioned": null,
            "secret": null
        }))
        .unwrap();

        assert_eq!(info.session_id, "abc");
        assert_eq!(info.user.user_id.as_deref(), Some("7"));
        assert_eq!(info.user_type, 0);
        assert!(info.user_ip.is_empty());
        assert!(!info.deprovisioned);
        assert!(info.secret.is_empty());
    }

    #[test]
    fn test_login_result_partial_object_keeps_defaults() {
        let info = LoginResponse::from_result(json!({"sessionid": "abc", "userid": "7"})).unwrap();

        assert_eq!(info.session_id, "abc");
        assert_eq!(info.user.user_id.as_deref(), Some("7"));
        assert_eq!(info.user_type, 0);
        assert!(info.secret.is_empty());
    }

    #[test]
    fn test_login_result_other_shapes_are_rejected() {
        for result in [json!(null), json!(42), json!(["abc"]), json!(true)] {
            assert!(matches!(
                LoginResponse::from_result(result),
                Err(Error::Decode(_))
            ));
        }
    }

    #[test]
    fn test_login_request_params() {
        let bare = serde_json::to_value(LoginRequest::new("Admin", "zabbix")).unwrap();
        assert_eq!(bare, json!({"username": "Admin", "password": "zabbix"}));

        let extended =
            serde_json::to_value(LoginRequest::new("Admin", "zabbix").with_user_data(true)).unwrap();
        assert_eq!(
            extended,
            json!({"username": "Admin", "password": "zabbix", "userData": true})
        );
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let debug = format!("{:?}", LoginRequest::new("Admin", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_user_with_medias() {
        let user: User = serde_json::from_value(json!({
            "userid": "3",
            "medias": [
                {"mediatypeid": "3", "sendto": "+15551234", "active": "0", "severity": "63", "period": "1-7,00:00-24:00"}
            ]
        }))
        .unwrap();

        let medias = user.medias.unwrap();
        assert_eq!(medias.len(), 1);
        assert_eq!(medias[0].media_type_id.as_deref(), Some("3"));
        assert_eq!(medias[0].send_to.as_deref(), Some("+15551234"));
        assert_eq!(medias[0].severity.as_deref(), Some("63"));
    }

    #[test]
    fn test_user_serialization_skips_unset_fields() {
        let user = User {
            username: Some("oncall".to_string()),
            role_id: Some("1".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"username": "oncall", "roleid": "1"})
        );
    }

    #[test]
    fn test_user_get_params() {
        let params = UserGetParams {
            output: Some(json!("extend")),
            select_medias: Some(json!(["mediatypeid", "sendto"])),
            filter: Some(json!({"username": ["Admin"]})),
            limit: Some(10),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "output": "extend",
                "selectMedias": ["mediatypeid", "sendto"],
                "filter": {"username": ["Admin"]},
                "limit": 10
            })
        );
    }
}
