use anyhow::{bail, ensure, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::queries::{
    project_query, projects_query, PageRequest, LIST_LIMIT, OWNER_BY_LOGIN, VIEWER_LOGINS,
    VIEWER_OWNER,
};
use super::types::{
    Owner, OwnerProjectResponse, OwnerProjectsResponse, OwnerType, Project,
    RepositoryOwnerResponse, ViewerResponse,
};
use crate::state::http::GraphqlTransport;
use crate::utils::prompt::Prompter;

/// Login that always resolves to the authenticated user.
pub const VIEWER_LOGIN: &str = "@me";

/// Resolves owners and projects, prompting when something is missing and
/// the session allows it.
pub struct ProjectClient<'a, T: GraphqlTransport + ?Sized, P: Prompter + ?Sized> {
    transport: &'a T,
    prompter: &'a P,
    default_owner: Option<String>,
}

impl<'a, T: GraphqlTransport + ?Sized, P: Prompter + ?Sized> ProjectClient<'a, T, P> {
    pub fn new(transport: &'a T, prompter: &'a P) -> Self {
        Self {
            transport,
            prompter,
            default_owner: None,
        }
    }

    #[must_use]
    pub fn with_default_owner(mut self, default_owner: Option<String>) -> Self {
        self.default_owner = default_owner.filter(|login| !login.is_empty());
        self
    }

    async fn query<R>(&self, operation_name: &str, document: &str, variables: Value) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let data = self
            .transport
            .execute(operation_name, document, variables)
            .await?;

        serde_json::from_value(data)
            .with_context(|| format!("Error while parsing `{operation_name}` response"))
    }

    /// Sends a mutation and deserializes its `data` into `R`.
    pub async fn mutate<R>(&self, operation_name: &str, document: &str, variables: Value) -> Result<R>
    where
        R: DeserializeOwned,
    {
        log::debug!("Running mutation {operation_name}");

        self.query(operation_name, document, variables).await
    }

    /// Resolves `login`, falling back to the stored default owner and then to a prompt.
    pub async fn new_owner(&self, can_prompt: bool, login: Option<&str>) -> Result<Owner> {
        let login = login
            .filter(|login| !login.is_empty())
            .map(str::to_string)
            .or_else(|| self.default_owner.clone());

        if let Some(login) = login {
            return self.owner_by_login(&login).await;
        }

        ensure!(can_prompt, "owner is required when not running interactively");

        let mut owners = self.viewer_owners().await?;
        let logins = owners
            .iter()
            .map(|owner| owner.login.clone())
            .collect::<Vec<_>>();

        let idx = self
            .prompter
            .select("Which owner would you like to use?", &logins)?;

        ensure!(idx < owners.len(), "Invalid owner selected");

        Ok(owners.swap_remove(idx))
    }

    async fn owner_by_login(&self, login: &str) -> Result<Owner> {
        if login == VIEWER_LOGIN {
            let response: ViewerResponse = self.query("ViewerOwner", VIEWER_OWNER, json!({})).await?;

            return Ok(Owner {
                id: response.viewer.id,
                login: response.viewer.login,
                o_type: OwnerType::Viewer,
            });
        }

        let response: RepositoryOwnerResponse = self
            .query("OwnerByLogin", OWNER_BY_LOGIN, json!({ "login": login }))
            .await?;

        let Some(owner) = response.repository_owner else {
            bail!("could not find owner {login}");
        };

        let o_type = match owner.typename.as_str() {
            "User" => OwnerType::User,
            "Organization" => OwnerType::Organization,
            other => bail!("unknown owner type `{other}` for {login}"),
        };

        log::debug!("Resolved owner {} ({o_type})", owner.login);

        Ok(Owner {
            id: owner.id,
            login: owner.login,
            o_type,
        })
    }

    /// The viewer followed by the organizations it can create projects in.
    async fn viewer_owners(&self) -> Result<Vec<Owner>> {
        let response: ViewerResponse = self.query("ViewerLogins", VIEWER_LOGINS, json!({})).await?;
        let viewer = response.viewer;

        let mut owners = vec![Owner {
            id: viewer.id,
            login: viewer.login,
            o_type: OwnerType::Viewer,
        }];

        owners.extend(
            viewer
                .organizations
                .map(|orgs| orgs.nodes)
                .unwrap_or_default()
                .into_iter()
                .filter(|org| org.viewer_can_create_projects)
                .map(|org| Owner {
                    id: org.id,
                    login: org.login,
                    o_type: OwnerType::Organization,
                }),
        );

        Ok(owners)
    }

    /// Resolves project `number` of `owner`, prompting for one when `number` is 0.
    pub async fn new_project(
        &self,
        can_prompt: bool,
        owner: &Owner,
        number: i32,
        include_fields: bool,
    ) -> Result<Project> {
        let pages = PageRequest::for_fields(include_fields);

        if number != 0 {
            return self.project_by_number(owner, number, pages).await;
        }

        ensure!(
            can_prompt,
            "project number is required when not running interactively"
        );

        let mut projects = self.projects(owner, pages).await?;
        ensure!(!projects.is_empty(), "no projects found for {}", owner.login);

        let titles = projects
            .iter()
            .map(|project| project.title.clone())
            .collect::<Vec<_>>();

        let idx = self
            .prompter
            .select("Which project would you like to use?", &titles)?;

        ensure!(idx < projects.len(), "Invalid project selected");

        Ok(projects.swap_remove(idx))
    }

    async fn project_by_number(
        &self,
        owner: &Owner,
        number: i32,
        pages: PageRequest,
    ) -> Result<Project> {
        let (operation_name, document) = project_query(owner.o_type);

        let variables = match owner.o_type {
            OwnerType::Viewer => json!({ "number": number }),
            _ => json!({ "login": owner.login, "number": number }),
        };

        let response: OwnerProjectResponse = self
            .query(operation_name, document, pages.bind(variables))
            .await?;

        response
            .owner
            .and_then(|owner| owner.project)
            .with_context(|| format!("could not find project {number} for {}", owner.login))
    }

    /// First page of the owner's projects.
    async fn projects(&self, owner: &Owner, pages: PageRequest) -> Result<Vec<Project>> {
        let (operation_name, document) = projects_query(owner.o_type);

        let variables = match owner.o_type {
            OwnerType::Viewer => json!({ "first": LIST_LIMIT }),
            _ => json!({ "login": owner.login, "first": LIST_LIMIT }),
        };

        let response: OwnerProjectsResponse = self
            .query(operation_name, document, pages.bind(variables))
            .await?;

        let projects = response
            .owner
            .with_context(|| format!("could not find owner {}", owner.login))?
            .projects;

        if projects.total_count > LIST_LIMIT {
            log::warn!(
                "{} has {} projects, only the first {LIST_LIMIT} are listed",
                owner.login,
                projects.total_count
            );
        }

        Ok(projects.nodes)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::commands::project::test_utils::{project_json, MockTransport, ScriptedPrompter};

    fn org_owner() -> Owner {
        Owner {
            id: "O_1".to_string(),
            login: "octo-org".to_string(),
            o_type: OwnerType::Organization,
        }
    }

    #[tokio::test]
    async fn test_new_owner_by_login() {
        let transport = MockTransport::new().respond(
            "OwnerByLogin",
            json!({ "repositoryOwner": { "__typename": "Organization", "id": "O_1", "login": "octo-org" } }),
        );
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let owner = client.new_owner(false, Some("octo-org")).await.unwrap();

        assert_eq!(owner, org_owner());
        assert_eq!(
            transport.calls(),
            vec![(
                "OwnerByLogin".to_string(),
                json!({ "login": "octo-org" })
            )]
        );
    }

    #[tokio::test]
    async fn test_new_owner_viewer() {
        let transport = MockTransport::new().respond(
            "ViewerOwner",
            json!({ "viewer": { "id": "U_1", "login": "monalisa" } }),
        );
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let owner = client.new_owner(false, Some(VIEWER_LOGIN)).await.unwrap();

        assert_eq!(owner.login, "monalisa");
        assert_eq!(owner.o_type, OwnerType::Viewer);
    }

    #[tokio::test]
    async fn test_new_owner_not_found() {
        let transport =
            MockTransport::new().respond("OwnerByLogin", json!({ "repositoryOwner": null }));
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let error = client.new_owner(true, Some("ghost")).await.unwrap_err();

        assert_eq!(error.to_string(), "could not find owner ghost");
    }

    #[tokio::test]
    async fn test_new_owner_uses_default() {
        let transport = MockTransport::new().respond(
            "OwnerByLogin",
            json!({ "repositoryOwner": { "__typename": "User", "id": "U_2", "login": "hubot" } }),
        );
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter)
            .with_default_owner(Some("hubot".to_string()));

        let owner = client.new_owner(false, None).await.unwrap();

        assert_eq!(owner.o_type, OwnerType::User);
        assert_eq!(owner.login, "hubot");
    }

    #[tokio::test]
    async fn test_new_owner_requires_prompt() {
        let transport = MockTransport::new();
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let error = client.new_owner(false, Some("")).await.unwrap_err();

        assert_eq!(
            error.to_string(),
            "owner is required when not running interactively"
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_new_owner_prompt() {
        let transport = MockTransport::new().respond(
            "ViewerLogins",
            json!({ "viewer": {
                "id": "U_1",
                "login": "monalisa",
                "organizations": { "totalCount": 2, "nodes": [
                    { "id": "O_1", "login": "octo-org", "viewerCanCreateProjects": true },
                    { "id": "O_2", "login": "read-only", "viewerCanCreateProjects": false }
                ] }
            } }),
        );
        let prompter = ScriptedPrompter::new(vec![1]);
        let client = ProjectClient::new(&transport, &prompter);

        let owner = client.new_owner(true, None).await.unwrap();

        assert_eq!(owner, org_owner());
        assert_eq!(
            prompter.prompts(),
            vec![(
                "Which owner would you like to use?".to_string(),
                vec!["monalisa".to_string(), "octo-org".to_string()]
            )]
        );
    }

    #[tokio::test]
    async fn test_new_project_by_number() {
        let transport = MockTransport::new().respond(
            "OrgProject",
            json!({ "owner": { "projectV2": project_json("PVT_1", 3, false) } }),
        );
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let project = client
            .new_project(false, &org_owner(), 3, false)
            .await
            .unwrap();

        assert_eq!(project.id, "PVT_1");
        assert_eq!(project.number, 3);
        assert_eq!(
            transport.calls(),
            vec![(
                "OrgProject".to_string(),
                json!({
                    "login": "octo-org",
                    "number": 3,
                    "firstItems": 0,
                    "afterItems": null,
                    "firstFields": 0,
                    "afterFields": null,
                })
            )]
        );
    }

    #[tokio::test]
    async fn test_new_project_include_fields() {
        let transport = MockTransport::new().respond(
            "ViewerProject",
            json!({ "owner": { "projectV2": project_json("PVT_1", 3, false) } }),
        );
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);
        let owner = Owner {
            o_type: OwnerType::Viewer,
            ..org_owner()
        };

        client.new_project(false, &owner, 3, true).await.unwrap();

        let (_, variables) = transport.calls().remove(0);
        assert_eq!(variables["firstFields"], LIST_LIMIT);
        assert!(variables.get("login").is_none());
    }

    #[tokio::test]
    async fn test_new_project_not_found() {
        let transport =
            MockTransport::new().respond("OrgProject", json!({ "owner": { "projectV2": null } }));
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let error = client
            .new_project(false, &org_owner(), 9, false)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "could not find project 9 for octo-org");
    }

    #[tokio::test]
    async fn test_new_project_requires_prompt() {
        let transport = MockTransport::new();
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let error = client
            .new_project(false, &org_owner(), 0, false)
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "project number is required when not running interactively"
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_new_project_prompt() {
        let transport = MockTransport::new().respond(
            "OrgProjects",
            json!({ "owner": { "projectsV2": { "totalCount": 2, "nodes": [
                project_json("PVT_1", 1, false),
                project_json("PVT_2", 2, true)
            ] } } }),
        );
        let prompter = ScriptedPrompter::new(vec![1]);
        let client = ProjectClient::new(&transport, &prompter);

        let project = client
            .new_project(true, &org_owner(), 0, false)
            .await
            .unwrap();

        assert_eq!(project.id, "PVT_2");
        assert_eq!(
            prompter.prompts()[0].1,
            vec!["Project 1".to_string(), "Project 2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_new_project_prompt_empty() {
        let transport = MockTransport::new().respond(
            "OrgProjects",
            json!({ "owner": { "projectsV2": { "totalCount": 0, "nodes": [] } } }),
        );
        let prompter = ScriptedPrompter::new(vec![]);
        let client = ProjectClient::new(&transport, &prompter);

        let error = client
            .new_project(true, &org_owner(), 0, false)
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "no projects found for octo-org");
        assert!(prompter.prompts().is_empty());
    }
}
