use crate::models::MenuNode;
use crate::store::MenuStore;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub(crate) fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        // Runtime config wins: `window.ENV.API_URL`, then `window.ENV.api_url`.
        if let Some(api_url) = Self::from_window() {
            return Self { api_url };
        }

        Self {
            api_url: Self::build_time_api_url(),
        }
    }

    fn from_window() -> Option<String> {
        let env = web_sys::window()?.get("ENV")?;
        if env.is_undefined() || !env.is_object() {
            return None;
        }

        ["API_URL", "api_url"].iter().find_map(|key| {
            js_sys::Reflect::get(&env, &(*key).into())
                .ok()
                .and_then(|v| v.as_string())
                .filter(|s| !s.trim().is_empty())
        })
    }

    /// `MENU_API_URL` at compile time, else the local dev backend.
    pub(crate) fn build_time_api_url() -> String {
        option_env!("MENU_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateMenuItemRequest {
    pub name: String,
    /// Serialized as `null` for a new root.
    pub parent_id: Option<String>,
    pub order: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UpdateMenuItemRequest {
    pub name: String,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    fn menu_item_path(id: &str) -> String {
        format!("/menus/{}", urlencoding::encode(id))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        ctx: &str,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.request(method, url);

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    async fn request_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
        ctx: &str,
    ) -> ApiResult<serde_json::Value> {
        self.send(method, path, body, ctx)
            .await?
            .json()
            .await
            .map_err(ApiError::parse)
    }

    /// `GET /menus` answers with an array; wrapped forms are accepted too.
    pub(crate) fn parse_menu_list_response(data: serde_json::Value) -> ApiResult<Vec<MenuNode>> {
        let list = if data.is_array() {
            data
        } else {
            data.get("menus")
                .or_else(|| data.get("data"))
                .filter(|v| v.is_array())
                .cloned()
                .ok_or_else(|| ApiError::parse(format!("Unexpected menu list response: {data}")))?
        };

        serde_json::from_value(list).map_err(ApiError::parse)
    }

    /// A single menu item, either bare or wrapped in `menu`/`data`.
    pub(crate) fn parse_menu_item_response(data: serde_json::Value) -> ApiResult<MenuNode> {
        let item = data
            .get("menu")
            .or_else(|| data.get("data"))
            .filter(|v| v.is_object())
            .cloned()
            .unwrap_or(data);

        serde_json::from_value(item).map_err(ApiError::parse)
    }

    pub async fn fetch_menus(&self) -> ApiResult<Vec<MenuNode>> {
        let data = self
            .request_json::<()>(reqwest::Method::GET, "/menus", None, "Failed to fetch menus")
            .await?;
        Self::parse_menu_list_response(data)
    }

    pub async fn create_menu_item(&self, req: &CreateMenuItemRequest) -> ApiResult<MenuNode> {
        let data = self
            .request_json(
                reqwest::Method::POST,
                "/menus",
                Some(req),
                "Failed to create menu item",
            )
            .await?;
        let node = Self::parse_menu_item_response(data)?;

        if node.id.trim().is_empty() {
            return Err(ApiError::parse(format!(
                "Create menu item succeeded but response is missing id: {}",
                node.name
            )));
        }

        Ok(node)
    }

    pub async fn update_menu_item(
        &self,
        id: &str,
        req: &UpdateMenuItemRequest,
    ) -> ApiResult<MenuNode> {
        let data = self
            .request_json(
                reqwest::Method::PATCH,
                &Self::menu_item_path(id),
                Some(req),
                "Failed to update menu item",
            )
            .await?;
        Self::parse_menu_item_response(data)
    }

    pub async fn delete_menu_item(&self, id: &str) -> ApiResult<()> {
        // The body (if any) carries nothing the client needs.
        self.send::<()>(
            reqwest::Method::DELETE,
            &Self::menu_item_path(id),
            None,
            "Failed to delete menu item",
        )
        .await?;
        Ok(())
    }
}

impl MenuStore for ApiClient {
    async fn fetch_all(&self) -> ApiResult<Vec<MenuNode>> {
        self.fetch_menus().await
    }

    async fn create(&self, req: &CreateMenuItemRequest) -> ApiResult<MenuNode> {
        self.create_menu_item(req).await
    }

    async fn rename(&self, id: &str, req: &UpdateMenuItemRequest) -> ApiResult<MenuNode> {
        self.update_menu_item(id, req).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.delete_menu_item(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_new_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/ ".to_string());
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_build_time_api_url_falls_back_to_default() {
        let url = EnvConfig::build_time_api_url();
        match option_env!("MENU_API_URL") {
            Some(v) if !v.trim().is_empty() => assert_eq!(url, v),
            _ => assert_eq!(url, DEFAULT_API_URL),
        }
    }

    #[test]
    fn test_menu_item_path_encodes_id() {
        assert_eq!(ApiClient::menu_item_path("42"), "/menus/42");
        assert_eq!(ApiClient::menu_item_path("a/b c"), "/menus/a%2Fb%20c");
    }

    #[test]
    fn test_create_request_serialization() {
        let req = CreateMenuItemRequest {
            name: "Contact".to_string(),
            parent_id: None,
            order: 0,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["name"], "Contact");
        assert!(v["parentId"].is_null());
        assert_eq!(v["order"], 0);

        let req = CreateMenuItemRequest {
            name: "Team".to_string(),
            parent_id: Some("1".to_string()),
            order: 0,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["parentId"], "1");
    }

    #[test]
    fn test_parse_menu_list_response_bare_array() {
        let data = serde_json::json!([
            {"id": "1", "name": "Main", "parentId": null, "children": [
                {"id": "2", "name": "About", "parentId": "1", "children": []}
            ]}
        ]);
        let menus = ApiClient::parse_menu_list_response(data).expect("should parse");
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].children[0].name, "About");
    }

    #[test]
    fn test_parse_menu_list_response_wrapped_and_invalid() {
        let data = serde_json::json!({"menus": [{"id": "1", "name": "Main"}]});
        let menus = ApiClient::parse_menu_list_response(data).expect("should parse");
        assert_eq!(menus[0].id, "1");

        let err = ApiClient::parse_menu_list_response(serde_json::json!({"ok": true}))
            .expect_err("object without list should fail");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn test_parse_menu_item_response_shapes() {
        let bare = serde_json::json!({"id": "3", "name": "Contact", "parentId": "1"});
        let node = ApiClient::parse_menu_item_response(bare).expect("bare item");
        assert_eq!(node.parent_id.as_deref(), Some("1"));

        let wrapped = serde_json::json!({"data": {"id": "3", "name": "Contact"}});
        let node = ApiClient::parse_menu_item_response(wrapped).expect("wrapped item");
        assert_eq!(node.id, "3");

        let err = ApiClient::parse_menu_item_response(serde_json::json!({"message": "ok"}))
            .expect_err("missing name should fail");
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[test]
    fn test_http_error_message_includes_status_and_body() {
        let err = ApiError::http(
            reqwest::StatusCode::NOT_FOUND,
            "no such menu".to_string(),
            "Failed to delete menu item",
        );
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(
            err.to_string(),
            "Failed to delete menu item (404 Not Found): no such menu"
        );
    }
}
