use std::io::Write;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use serde_json::{json, Value};

use super::client::ProjectClient;
use super::format::json_project;
use super::queries::{MARK_PROJECT_TEMPLATE, NO_NESTED_PAGES, UNMARK_PROJECT_TEMPLATE};
use super::types::Project;
use crate::errors::FlagError;
use crate::flag_error;
use crate::state::http::GraphqlTransport;
use crate::state::State;
use crate::utils::io::IoStreams;
use crate::utils::prompt::{DialoguerPrompter, Prompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
}

#[derive(Debug, Parser)]
#[clap(
    about = "Mark a project as a template",
    after_help = "Examples:
  # mark the octo-org's project \"1\" as a template
  ghp project template 1 --owner octo-org

  # unmark the octo-org's project \"1\" as a template
  ghp project template 1 --owner octo-org --undo"
)]
pub struct Options {
    #[clap(name = "number", help = "Number of the project")]
    pub number: Option<String>,

    #[clap(
        long = "owner",
        help = "Login of the owner, use \"@me\" for the current user"
    )]
    pub owner: Option<String>,

    #[clap(long = "undo", help = "Unmark the project as a template")]
    pub undo: bool,

    #[clap(long = "format", value_enum, help = "Output format")]
    pub format: Option<OutputFormat>,
}

/// Validated command input, the project id is only known after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    pub owner: Option<String>,
    pub undo: bool,
    pub number: i32,
    pub format: Option<OutputFormat>,
}

impl TryFrom<Options> for TemplateOptions {
    type Error = FlagError;

    fn try_from(options: Options) -> Result<Self, Self::Error> {
        Ok(Self {
            number: parse_number(options.number.as_deref())?,
            owner: options.owner,
            undo: options.undo,
            format: options.format,
        })
    }
}

/// A missing number means unset (0), anything else has to fit in an `i32`.
pub fn parse_number(number: Option<&str>) -> Result<i32, FlagError> {
    match number {
        Some(number) => number
            .parse::<i32>()
            .map_err(|_| flag_error!("invalid number: {number}")),
        None => Ok(0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateAction {
    Mark,
    Unmark,
}

impl TemplateAction {
    pub fn from_undo(undo: bool) -> Self {
        if undo {
            Self::Unmark
        } else {
            Self::Mark
        }
    }

    pub fn operation_name(self) -> &'static str {
        match self {
            Self::Mark => "MarkProjectTemplate",
            Self::Unmark => "UnmarkProjectTemplate",
        }
    }

    pub fn document(self) -> &'static str {
        match self {
            Self::Mark => MARK_PROJECT_TEMPLATE,
            Self::Unmark => UNMARK_PROJECT_TEMPLATE,
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Mark => "Marked",
            Self::Unmark => "Unmarked",
        }
    }
}

/// One mark or unmark request against a resolved project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMutation {
    pub action: TemplateAction,
    pub project_id: String,
}

impl TemplateMutation {
    pub fn new(action: TemplateAction, project_id: &str) -> Self {
        Self {
            action,
            project_id: project_id.to_string(),
        }
    }

    pub fn variables(&self) -> Value {
        NO_NESTED_PAGES.bind(json!({
            "input": { "projectId": self.project_id },
        }))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateProjectResponse {
    pub template_project: TemplateProject,
}

#[derive(Debug, Deserialize)]
pub struct TemplateProject {
    #[serde(rename = "projectV2")]
    pub project: Project,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    let options = TemplateOptions::try_from(options)?;

    state.ensure_token()?;

    let prompter = DialoguerPrompter;
    let client = ProjectClient::new(&state.http, &prompter)
        .with_default_owner(state.ctx.default_owner.clone());
    let mut io = IoStreams::system(state.is_ci);

    run_template(&client, &options, &mut io).await
}

pub async fn run_template<T, P, W>(
    client: &ProjectClient<'_, T, P>,
    options: &TemplateOptions,
    io: &mut IoStreams<W>,
) -> Result<()>
where
    T: GraphqlTransport + ?Sized,
    P: Prompter + ?Sized,
    W: Write,
{
    let can_prompt = io.can_prompt();

    let owner = client
        .new_owner(can_prompt, options.owner.as_deref())
        .await?;

    let project = client
        .new_project(can_prompt, &owner, options.number, false)
        .await?;

    let mutation = TemplateMutation::new(TemplateAction::from_undo(options.undo), &project.id);

    let response: TemplateProjectResponse = client
        .mutate(
            mutation.action.operation_name(),
            mutation.action.document(),
            mutation.variables(),
        )
        .await?;

    log::debug!(
        "Project {} template status is now {}",
        response.template_project.project.id,
        response.template_project.project.template
    );

    match options.format {
        // the snapshot from before the mutation, not the response
        Some(OutputFormat::Json) => print_json(io, &project),
        None => print_results(io, mutation.action, &response.template_project.project),
    }
}

fn print_results<W: Write>(
    io: &mut IoStreams<W>,
    action: TemplateAction,
    project: &Project,
) -> Result<()> {
    if !io.is_stdout_tty() {
        return Ok(());
    }

    writeln!(
        io.out,
        "{} project {} as a template.",
        action.past_tense(),
        project.number
    )?;

    Ok(())
}

fn print_json<W: Write>(io: &mut IoStreams<W>, project: &Project) -> Result<()> {
    let json = json_project(project)?;

    io.out.write_all(&json)?;

    Ok(())
}
