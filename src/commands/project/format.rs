use anyhow::Result;
use serde::Serialize;

use super::types::Project;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectJson<'a> {
    number: i32,
    url: &'a str,
    short_description: &'a str,
    public: bool,
    closed: bool,
    template: bool,
    title: &'a str,
    id: &'a str,
    readme: &'a str,
    items: TotalCount,
    fields: TotalCount,
    owner: OwnerJson<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalCount {
    total_count: u32,
}

#[derive(Serialize)]
struct OwnerJson<'a> {
    #[serde(rename = "type")]
    o_type: &'a str,
    login: &'a str,
}

/// Serializes the public shape of a project, nested collections collapse to their counts.
pub fn json_project(project: &Project) -> Result<Vec<u8>> {
    let json = ProjectJson {
        number: project.number,
        url: &project.url,
        short_description: project.short_description.as_deref().unwrap_or_default(),
        public: project.public,
        closed: project.closed,
        template: project.template,
        title: &project.title,
        id: &project.id,
        readme: project.readme.as_deref().unwrap_or_default(),
        items: TotalCount {
            total_count: project.items.total_count,
        },
        fields: TotalCount {
            total_count: project.fields.total_count,
        },
        owner: OwnerJson {
            o_type: &project.owner.typename,
            login: &project.owner.login,
        },
    };

    Ok(serde_json::to_vec(&json)?)
}
