use serde::Serialize;
use serde_json::{Map, Value};

use super::types::OwnerType;

/// Upper bound for the single page read when a list is offered as a prompt.
pub const LIST_LIMIT: u32 = 100;

/// Page sizes and cursors for the collections nested in every project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub first_items: u32,
    pub after_items: Option<&'static str>,
    pub first_fields: u32,
    pub after_fields: Option<&'static str>,
}

/// Asks for zero items and zero fields. Commands that only need the project
/// itself bind this so the API never walks the nested connections.
pub const NO_NESTED_PAGES: PageRequest = PageRequest {
    first_items: 0,
    after_items: None,
    first_fields: 0,
    after_fields: None,
};

impl PageRequest {
    pub fn for_fields(include_fields: bool) -> Self {
        if include_fields {
            Self {
                first_fields: LIST_LIMIT,
                ..NO_NESTED_PAGES
            }
        } else {
            NO_NESTED_PAGES
        }
    }

    /// Merges the page variables into `variables`, which must be an object.
    pub fn bind(&self, variables: Value) -> Value {
        let mut map = match variables {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        if let Ok(Value::Object(pages)) = serde_json::to_value(self) {
            map.extend(pages);
        }

        Value::Object(map)
    }
}

macro_rules! page_variables {
    () => {
        "$firstItems: Int!, $afterItems: String, $firstFields: Int!, $afterFields: String"
    };
}

macro_rules! project_fields {
    () => {
        "number url shortDescription public closed template title id readme \
         items(first: $firstItems, after: $afterItems) { totalCount nodes { id } } \
         fields(first: $firstFields, after: $afterFields) { totalCount nodes { ... on ProjectV2FieldCommon { id name } } } \
         owner { __typename ... on User { login } ... on Organization { login } }"
    };
}

pub const VIEWER_OWNER: &str = "query ViewerOwner { viewer { id login } }";

pub const VIEWER_LOGINS: &str = "query ViewerLogins { viewer { id login organizations(first: 100) { totalCount nodes { id login viewerCanCreateProjects } } } }";

pub const OWNER_BY_LOGIN: &str =
    "query OwnerByLogin($login: String!) { repositoryOwner(login: $login) { __typename id login } }";

const USER_PROJECT: &str = concat!(
    "query UserProject($login: String!, $number: Int!, ",
    page_variables!(),
    ") { owner: user(login: $login) { projectV2(number: $number) { ",
    project_fields!(),
    " } } }"
);

const ORG_PROJECT: &str = concat!(
    "query OrgProject($login: String!, $number: Int!, ",
    page_variables!(),
    ") { owner: organization(login: $login) { projectV2(number: $number) { ",
    project_fields!(),
    " } } }"
);

const VIEWER_PROJECT: &str = concat!(
    "query ViewerProject($number: Int!, ",
    page_variables!(),
    ") { owner: viewer { projectV2(number: $number) { ",
    project_fields!(),
    " } } }"
);

const USER_PROJECTS: &str = concat!(
    "query UserProjects($login: String!, $first: Int!, ",
    page_variables!(),
    ") { owner: user(login: $login) { projectsV2(first: $first) { totalCount nodes { ",
    project_fields!(),
    " } } } }"
);

const ORG_PROJECTS: &str = concat!(
    "query OrgProjects($login: String!, $first: Int!, ",
    page_variables!(),
    ") { owner: organization(login: $login) { projectsV2(first: $first) { totalCount nodes { ",
    project_fields!(),
    " } } } }"
);

const VIEWER_PROJECTS: &str = concat!(
    "query ViewerProjects($first: Int!, ",
    page_variables!(),
    ") { owner: viewer { projectsV2(first: $first) { totalCount nodes { ",
    project_fields!(),
    " } } } }"
);

pub const MARK_PROJECT_TEMPLATE: &str = concat!(
    "mutation MarkProjectTemplate($input: MarkProjectV2AsTemplateInput!, ",
    page_variables!(),
    ") { templateProject: markProjectV2AsTemplate(input: $input) { projectV2 { ",
    project_fields!(),
    " } } }"
);

pub const UNMARK_PROJECT_TEMPLATE: &str = concat!(
    "mutation UnmarkProjectTemplate($input: UnmarkProjectV2AsTemplateInput!, ",
    page_variables!(),
    ") { templateProject: unmarkProjectV2AsTemplate(input: $input) { projectV2 { ",
    project_fields!(),
    " } } }"
);

/// Operation name and document for a single project lookup.
pub fn project_query(o_type: OwnerType) -> (&'static str, &'static str) {
    match o_type {
        OwnerType::User => ("UserProject", USER_PROJECT),
        OwnerType::Organization => ("OrgProject", ORG_PROJECT),
        OwnerType::Viewer => ("ViewerProject", VIEWER_PROJECT),
    }
}

/// Operation name and document for listing an owner's projects.
pub fn projects_query(o_type: OwnerType) -> (&'static str, &'static str) {
    match o_type {
        OwnerType::User => ("UserProjects", USER_PROJECTS),
        OwnerType::Organization => ("OrgProjects", ORG_PROJECTS),
        OwnerType::Viewer => ("ViewerProjects", VIEWER_PROJECTS),
    }
}
