use std::fmt::Display;

use serde::Deserialize;

/// A resolved project owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
    pub login: String,
    pub o_type: OwnerType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerType {
    User,
    Organization,
    // the authenticated user, queried through `viewer`
    Viewer,
}

impl Display for OwnerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerType::User | OwnerType::Viewer => write!(f, "User"),
            OwnerType::Organization => write!(f, "Organization"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub number: i32,
    pub title: String,
    pub url: String,
    pub short_description: Option<String>,
    pub readme: Option<String>,
    pub public: bool,
    pub closed: bool,
    pub template: bool,
    pub items: Connection<ItemNode>,
    pub fields: Connection<FieldNode>,
    pub owner: ProjectOwner,
}

// `default` on `nodes` would otherwise require `T: Default`
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    pub total_count: u32,
    #[serde(default)]
    pub nodes: Vec<T>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ItemNode {
    pub id: String,
}

// fields are a union, nodes outside of `ProjectV2FieldCommon` come back empty
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FieldNode {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProjectOwner {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub login: String,
}

// query responses

#[derive(Debug, Deserialize)]
pub struct ViewerResponse {
    pub viewer: ViewerNode,
}

#[derive(Debug, Deserialize)]
pub struct ViewerNode {
    pub id: String,
    pub login: String,
    #[serde(default)]
    pub organizations: Option<Connection<OrganizationNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationNode {
    pub id: String,
    pub login: String,
    pub viewer_can_create_projects: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryOwnerResponse {
    pub repository_owner: Option<RepositoryOwnerNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryOwnerNode {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub id: String,
    pub login: String,
}

/// Every project query aliases its root field to `owner`.
#[derive(Debug, Deserialize)]
pub struct OwnerProjectResponse {
    pub owner: Option<OwnerProject>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerProject {
    #[serde(rename = "projectV2")]
    pub project: Option<Project>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerProjectsResponse {
    pub owner: Option<OwnerProjects>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerProjects {
    #[serde(rename = "projectsV2")]
    pub projects: Connection<Project>,
}
