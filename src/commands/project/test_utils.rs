use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use anyhow::{anyhow, ensure, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::state::http::GraphqlTransport;
use crate::utils::prompt::Prompter;

/// Replays canned `data` objects by operation name and records every call.
#[derive(Default)]
pub struct MockTransport {
    responses: HashMap<String, Result<Value, String>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, operation_name: &str, data: Value) -> Self {
        self.responses.insert(operation_name.to_string(), Ok(data));
        self
    }

    pub fn fail(mut self, operation_name: &str, message: &str) -> Self {
        self.responses
            .insert(operation_name.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }
}

#[async_trait]
impl GraphqlTransport for MockTransport {
    async fn execute(&self, operation_name: &str, query: &str, variables: Value) -> Result<Value> {
        assert!(
            query.contains(operation_name),
            "document does not declare {operation_name}"
        );

        self.calls
            .lock()
            .unwrap()
            .push((operation_name.to_string(), variables));

        match self.responses.get(operation_name) {
            Some(Ok(data)) => Ok(data.clone()),
            Some(Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("unexpected operation {operation_name}")),
        }
    }
}

/// Answers prompts from a fixed script.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<usize>>,
    prompts: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<usize>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn prompts(&self) -> Vec<(String, Vec<String>)> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), items.to_vec()));

        let answer = self.answers.lock().unwrap().pop_front();
        ensure!(answer.is_some(), "unexpected prompt: {prompt}");

        Ok(answer.unwrap())
    }
}

pub fn project_json(id: &str, number: i32, template: bool) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": format!("Project {number}"),
        "url": format!("https://github.com/orgs/octo-org/projects/{number}"),
        "shortDescription": "Roadmap",
        "readme": null,
        "public": true,
        "closed": false,
        "template": template,
        "items": { "totalCount": 12, "nodes": [] },
        "fields": { "totalCount": 8, "nodes": [] },
        "owner": { "__typename": "Organization", "login": "octo-org" }
    })
}
