use crate::error::{Error, Result};
use crate::names::{closest_match, normalize_class_name, normalize_func_name};
use crate::request::{RequestContext, build_and_send_with_vars};
use log::debug;
use postrs_http::sender::HttpSender;
use postrs_http::types::HttpResponse;
use postrs_models::{
    Auth, Collection, CollectionEntry, CollectionItem, Environments, RequestOverrides,
};
use serde_json::Value;
use std::path::Path;

/// Folder holding the requests that sit at the top of the collection.
pub const TOP_REQUESTS: &str = "Root";

#[derive(Debug, Clone)]
pub struct PostRequest {
    /// Normalized with [`normalize_func_name`]
    pub name: String,
    pub item: CollectionItem,
    pub responses: Vec<Value>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PostFolder {
    /// Normalized with [`normalize_class_name`], or [`TOP_REQUESTS`]
    pub name: String,
    requests: Vec<PostRequest>,
}

impl PostFolder {
    pub fn request(&self, name: &str) -> Result<&PostRequest> {
        if let Some(r) = self.requests.iter().find(|r| r.name == name) {
            return Ok(r);
        }

        let choices: Vec<&str> = self.requests.iter().map(|r| r.name.as_str()).collect();
        let hint = match closest_match(name, choices.iter().copied(), 0.0) {
            Some(similar) => format!("Did you mean {similar}"),
            None => format!("Your choices are: {}", choices.join(", ")),
        };
        Err(Error::RequestNotFound { name: name.to_string(), folder: self.name.clone(), hint })
    }

    pub fn requests(&self) -> impl Iterator<Item = &PostRequest> {
        self.requests.iter()
    }

    pub fn help(&self) -> Vec<String> {
        self.requests.iter().map(|r| format!("{}.{}", self.name, r.name)).collect()
    }

    fn insert(&mut self, request: PostRequest) {
        match self.requests.iter_mut().find(|r| r.name == request.name) {
            Some(existing) => *existing = request,
            None => self.requests.push(request),
        }
    }
}

/// A loaded collection with its requests grouped into flat, named folders.
#[derive(Debug, Clone)]
pub struct PostCollection {
    collection: Collection,
    folders: Vec<PostFolder>,
    pub environments: Environments,
    pub request_overrides: Option<RequestOverrides>,
}

impl PostCollection {
    pub fn from_path(
        path: impl AsRef<Path>,
        request_overrides: Option<RequestOverrides>,
    ) -> Result<Self> {
        Ok(Self::new(Collection::from_path(path)?, request_overrides))
    }

    pub fn from_json(contents: &str, request_overrides: Option<RequestOverrides>) -> Result<Self> {
        Ok(Self::new(Collection::from_json(contents)?, request_overrides))
    }

    pub fn new(collection: Collection, request_overrides: Option<RequestOverrides>) -> Self {
        let mut c = Self {
            folders: Vec::new(),
            environments: Environments::new(),
            request_overrides,
            collection,
        };
        let entries = c.collection.item.clone();
        c.walk_folder(TOP_REQUESTS, &entries);
        c
    }

    fn walk_folder(&mut self, folder_name: &str, entries: &[CollectionEntry]) {
        debug!("start {folder_name}");
        self.folder_mut(folder_name);

        for entry in entries {
            match &entry.item {
                Some(children) => {
                    let sub_folder = normalize_class_name(&entry.name);
                    self.walk_folder(&sub_folder, children);
                }
                None => {
                    let Some(item) = &entry.request else {
                        continue;
                    };
                    let mut item = item.clone();
                    item.name = entry.name.clone();
                    let request = PostRequest {
                        name: normalize_func_name(&entry.name),
                        description: item.description_text(),
                        responses: entry.response.clone(),
                        item,
                    };
                    self.folder_mut(folder_name).insert(request);
                }
            }
        }
    }

    fn folder_mut(&mut self, name: &str) -> &mut PostFolder {
        let idx = match self.folders.iter().position(|f| f.name == name) {
            Some(idx) => idx,
            None => {
                self.folders.push(PostFolder { name: name.to_string(), requests: Vec::new() });
                self.folders.len() - 1
            }
        };
        &mut self.folders[idx]
    }

    pub fn name(&self) -> &str {
        &self.collection.info.name
    }

    /// Collection-level auth settings, if any.
    pub fn auth(&self) -> Option<&Auth> {
        self.collection.auth.as_ref()
    }

    pub fn load_environment(&mut self, path: impl AsRef<Path>) -> Result<()> {
        Ok(self.environments.load(path)?)
    }

    pub fn folder(&self, name: &str) -> Result<&PostFolder> {
        if let Some(f) = self.folders.iter().find(|f| f.name == name) {
            return Ok(f);
        }

        let choices: Vec<&str> = self.folders.iter().map(|f| f.name.as_str()).collect();
        let hint = match closest_match(name, choices.iter().copied(), 0.6) {
            Some(similar) => format!("Did you mean {similar}?"),
            None => format!("Your choices are: {}", choices.join(", ")),
        };
        Err(Error::FolderNotFound { name: name.to_string(), hint })
    }

    pub fn walk(&self) -> impl Iterator<Item = &PostFolder> {
        self.folders.iter()
    }

    pub fn help(&self) -> Vec<String> {
        self.folders.iter().flat_map(|f| f.help()).collect()
    }

    pub fn context(&self) -> RequestContext {
        RequestContext {
            environments: self.environments.clone(),
            request_overrides: self.request_overrides.clone(),
            auth: self.collection.auth.clone(),
        }
    }

    /// Send `folder.request`, with `call_vars` taking precedence over the environments.
    pub async fn send<S: HttpSender + ?Sized>(
        &self,
        folder: &str,
        request: &str,
        sender: &S,
        call_vars: &Environments,
    ) -> Result<HttpResponse> {
        let request = self.folder(folder)?.request(request)?;
        build_and_send_with_vars(&request.item, &self.context(), sender, call_vars).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_sender::RecordingSender;
    use serde_json::json;

    fn collection() -> PostCollection {
        PostCollection::from_json(
            &json!({
                "info": {"name": "Demo"},
                "item": [
                    {"name": "Health Check", "request": {"url": "{{host}}/health", "method": "GET"}, "response": []},
                    {"name": "user management", "item": [
                        {"name": "Get User", "request": {
                            "url": {"raw": "{{host}}/users/{{id}}"},
                            "method": "GET",
                            "header": [{"key": "Accept", "value": "application/json"}],
                            "description": "Fetch one user",
                        }, "response": []},
                        {"name": "admin-only", "item": [
                            {"name": "Delete User", "request": {"url": "{{host}}/users/{{id}}", "method": "DELETE"}},
                        ]},
                    ]},
                    {"name": "not a request"},
                ],
            })
            .to_string(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_walk_flattens_folders() {
        let c = collection();
        let names: Vec<&str> = c.walk().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![TOP_REQUESTS, "UserManagement", "AdminOnly"]);
        assert_eq!(c.help(), vec![
            "Root.health_check".to_string(),
            "UserManagement.get_user".to_string(),
            "AdminOnly.delete_user".to_string(),
        ]);
        assert_eq!(c.name(), "Demo");
    }

    #[test]
    fn test_request_keeps_display_name_and_description() -> Result<()> {
        let c = collection();
        let r = c.folder("UserManagement")?.request("get_user")?;
        assert_eq!(r.item.name, "Get User");
        assert_eq!(r.description.as_deref(), Some("Fetch one user"));
        Ok(())
    }

    #[test]
    fn test_folder_not_found_suggests() {
        let c = collection();
        let err = c.folder("UserManagment").unwrap_err();
        assert_eq!(
            err.to_string(),
            "UserManagment folder does not exist in Postman collection.\nDid you mean UserManagement?"
        );

        let err = c.folder("Zzz").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Zzz folder does not exist in Postman collection.\nYour choices are: Root, UserManagement, AdminOnly"
        );
    }

    #[test]
    fn test_request_not_found_suggests() -> Result<()> {
        let c = collection();
        let err = c.folder("UserManagement")?.request("get_usr").unwrap_err();
        assert_eq!(
            err.to_string(),
            "get_usr request does not exist in UserManagement folder.\nDid you mean get_user"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_send_renders_environment_and_call_vars() -> Result<()> {
        let mut c = collection();
        c.environments.insert("host", "https://api.test");
        c.environments.insert("id", "1");
        c.request_overrides = Some(RequestOverrides::with_headers([("X-Run", "yes")]));

        let sender = RecordingSender::default();
        let call_vars: Environments = [("id", "5")].into_iter().collect();
        let response = c.send("UserManagement", "get_user", &sender, &call_vars).await?;
        assert_eq!(response.status, 200);

        let calls = sender.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://api.test/users/5");
        assert_eq!(calls[0].method, "GET");
        assert_eq!(calls[0].headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(calls[0].headers.get("X-Run").map(String::as_str), Some("yes"));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_unknown_request_does_not_call_sender() {
        let c = collection();
        let sender = RecordingSender::default();
        let result = c.send("Root", "nope", &sender, &Environments::new()).await;
        assert!(matches!(result, Err(Error::RequestNotFound { .. })));
        assert!(sender.calls().is_empty());
    }

    #[test]
    fn test_collection_auth_in_context() {
        let c = PostCollection::new(
            Collection { auth: Some(Auth::bearer("{{token}}")), ..Default::default() },
            None,
        );
        assert_eq!(c.auth().and_then(|a| a.auth_type.as_deref()), Some("bearer"));
        assert_eq!(c.context().auth, Some(Auth::bearer("{{token}}")));
        assert_eq!(c.help(), Vec::<String>::new());
    }
}
