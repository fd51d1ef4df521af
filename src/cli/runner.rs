//! CLI runner - executes commands

use crate::cli::commands::{
    ActivationCommands, AudienceCommands, Cli, Commands, DatabaseCommands, ImportCommands,
    JobCommands, JourneyCommands, OutputFormat, PolicyCommands, SegmentCommands, TableCommands,
    UserCommands, WorkflowCommands,
};
use crate::client::Client;
use crate::config::{
    ClientConfig, ENV_API_ENDPOINT, ENV_API_KEY, ENV_CDP_ENDPOINT, ENV_WORKFLOW_ENDPOINT,
};
use crate::decode::FlexTime;
use crate::error::{Error, Result};
use crate::models::{
    ActivationRequest, AttemptListParams, JobListParams, JobStatus, PolicyRequest, QueryRequest,
    SegmentRequest, StartAttemptRequest, TableUpdate,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Interval between job status polls while waiting
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Settings carried by a `--config` JSON file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    apikey: Option<String>,
    endpoint: Option<String>,
    cdp_endpoint: Option<String>,
    workflow_endpoint: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("bad config file {}: {e}", path.display())))
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::new(self.client_config()?)?;

        match &self.cli.command {
            Commands::Database { command } => self.database(&client, command).await,
            Commands::Table { command } => self.table(&client, command).await,
            Commands::Query {
                database,
                query,
                engine,
                priority,
                wait,
            } => {
                self.query(&client, database, query, *engine, *priority, *wait)
                    .await
            }
            Commands::Job { command } => self.job(&client, command).await,
            Commands::User { command } => self.user(&client, command).await,
            Commands::Policy { command } => self.policy(&client, command).await,
            Commands::Import { command } => self.import(&client, command).await,
            Commands::Audience { command } => self.audience(&client, command).await,
            Commands::Segment { command } => self.segment(&client, command).await,
            Commands::Activation { command } => self.activation(&client, command).await,
            Commands::Journey { command } => self.journey(&client, command).await,
            Commands::Workflow { command } => self.workflow(&client, command).await,
        }
    }

    /// Resolve configuration: env, then config file, then flags
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::default();
        let mut apikey = std::env::var(ENV_API_KEY).ok();

        if let Ok(endpoint) = std::env::var(ENV_API_ENDPOINT) {
            config.api_endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var(ENV_CDP_ENDPOINT) {
            config.cdp_endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var(ENV_WORKFLOW_ENDPOINT) {
            config.workflow_endpoint = endpoint;
        }

        if let Some(path) = &self.cli.config {
            let file = FileConfig::load(path)?;
            if file.apikey.is_some() {
                apikey = file.apikey;
            }
            if let Some(endpoint) = file.endpoint {
                config.api_endpoint = endpoint;
            }
            if let Some(endpoint) = file.cdp_endpoint {
                config.cdp_endpoint = endpoint;
            }
            if let Some(endpoint) = file.workflow_endpoint {
                config.workflow_endpoint = endpoint;
            }
        }

        if self.cli.apikey.is_some() {
            apikey = self.cli.apikey.clone();
        }
        if let Some(endpoint) = &self.cli.endpoint {
            config.api_endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.cli.cdp_endpoint {
            config.cdp_endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.cli.workflow_endpoint {
            config.workflow_endpoint = endpoint.clone();
        }

        let apikey = apikey.ok_or(Error::MissingApiKey)?;
        config.credentials = crate::auth::Credentials::api_key(apikey);
        config.validate()?;
        Ok(config)
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Print a decoded model in the selected format
    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Pretty => print_pretty(&serde_json::to_value(value)?),
        }
        Ok(())
    }

    /// Print a one-line confirmation for mutations with no response body
    fn confirm(&self, message: impl std::fmt::Display) {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "ok": message.to_string() })),
            OutputFormat::Pretty => println!("{message}"),
        }
    }

    // ========================================================================
    // Core surface
    // ========================================================================

    async fn database(&self, client: &Client, command: &DatabaseCommands) -> Result<()> {
        let service = client.databases();
        match command {
            DatabaseCommands::List => self.emit(&service.list().await?),
            DatabaseCommands::Create { name } => {
                service.create(name).await?;
                self.confirm(format_args!("created database {name}"));
                Ok(())
            }
            DatabaseCommands::Delete { name } => {
                service.delete(name).await?;
                self.confirm(format_args!("deleted database {name}"));
                Ok(())
            }
        }
    }

    async fn table(&self, client: &Client, command: &TableCommands) -> Result<()> {
        let service = client.tables();
        match command {
            TableCommands::List { database } => self.emit(&service.list(database).await?),
            TableCommands::Create { database, table } => {
                service.create(database, table).await?;
                self.confirm(format_args!("created table {database}.{table}"));
                Ok(())
            }
            TableCommands::Update {
                database,
                table,
                expire_days,
                delete_protected,
            } => {
                let update = TableUpdate {
                    expire_days: *expire_days,
                    delete_protected: *delete_protected,
                };
                service.update(database, table, &update).await?;
                self.confirm(format_args!("updated table {database}.{table}"));
                Ok(())
            }
            TableCommands::Delete { database, table } => {
                service.delete(database, table).await?;
                self.confirm(format_args!("deleted table {database}.{table}"));
                Ok(())
            }
            TableCommands::Swap {
                database,
                table1,
                table2,
            } => {
                service.swap(database, table1, table2).await?;
                self.confirm(format_args!("swapped {database}.{table1} with {database}.{table2}"));
                Ok(())
            }
        }
    }

    async fn query(
        &self,
        client: &Client,
        database: &str,
        query: &str,
        engine: crate::models::QueryEngine,
        priority: Option<i32>,
        wait: bool,
    ) -> Result<()> {
        let request = QueryRequest {
            priority,
            ..QueryRequest::new(query)
        };
        let issued = client.jobs().issue(engine, database, &request).await?;
        let job_id = issued.job_id.to_string();

        if !wait {
            return self.emit(&issued);
        }

        loop {
            let status = client.jobs().status(&job_id).await?;
            debug!("job {} is {}", job_id, status.status);
            if status.status.is_finished() {
                if status.status != JobStatus::Success {
                    return Err(Error::Other(format!(
                        "job {job_id} finished with status {}",
                        status.status
                    )));
                }
                break;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        self.stream_result(client, &job_id).await
    }

    async fn job(&self, client: &Client, command: &JobCommands) -> Result<()> {
        let service = client.jobs();
        match command {
            JobCommands::List { from, to, status } => {
                let params = JobListParams {
                    from: *from,
                    to: *to,
                    status: *status,
                };
                self.emit(&service.list(&params).await?)
            }
            JobCommands::Show { id } => self.emit(&service.show(id).await?),
            JobCommands::Status { id } => self.emit(&service.status(id).await?),
            JobCommands::Kill { id } => self.emit(&service.kill(id).await?),
            JobCommands::Result { id } => self.stream_result(client, id).await,
        }
    }

    /// Stream a job's result lines to stdout
    async fn stream_result(&self, client: &Client, job_id: &str) -> Result<()> {
        let mut cursor = client.jobs().result(job_id).await?;
        while cursor.advance().await {
            println!("{}", cursor.current_text());
        }
        let outcome = match cursor.last_error() {
            Some(e) => Err(Error::Other(format!("result stream failed: {e}"))),
            None => Ok(()),
        };
        cursor.release();
        outcome
    }

    async fn user(&self, client: &Client, command: &UserCommands) -> Result<()> {
        let service = client.users();
        match command {
            UserCommands::List => self.emit(&service.list().await?),
            UserCommands::Create { name, email } => {
                service.create(name, email).await?;
                self.confirm(format_args!("created user {name}"));
                Ok(())
            }
            UserCommands::Delete { name } => {
                service.delete(name).await?;
                self.confirm(format_args!("deleted user {name}"));
                Ok(())
            }
            UserCommands::Apikeys { name } => self.emit(&service.api_keys(name).await?),
        }
    }

    async fn policy(&self, client: &Client, command: &PolicyCommands) -> Result<()> {
        let service = client.policies();
        match command {
            PolicyCommands::List => self.emit(&service.list().await?),
            PolicyCommands::Show { id } => self.emit(&service.get(*id).await?),
            PolicyCommands::Create { name, description } => {
                let request = PolicyRequest {
                    description: description.clone(),
                    ..PolicyRequest::new(name)
                };
                self.emit(&service.create(&request).await?)
            }
            PolicyCommands::Delete { id } => {
                service.delete(*id).await?;
                self.confirm(format_args!("deleted policy {id}"));
                Ok(())
            }
            PolicyCommands::Attach { policy_id, user_id } => {
                service.attach_user(*policy_id, *user_id).await?;
                self.confirm(format_args!("attached user {user_id} to policy {policy_id}"));
                Ok(())
            }
            PolicyCommands::Detach { policy_id, user_id } => {
                service.detach_user(*policy_id, *user_id).await?;
                self.confirm(format_args!("detached user {user_id} from policy {policy_id}"));
                Ok(())
            }
        }
    }

    async fn import(&self, client: &Client, command: &ImportCommands) -> Result<()> {
        let service = client.bulk_imports();
        match command {
            ImportCommands::List => self.emit(&service.list().await?),
            ImportCommands::Show { name } => self.emit(&service.show(name).await?),
            ImportCommands::Create {
                name,
                database,
                table,
            } => {
                service.create(name, database, table).await?;
                self.confirm(format_args!("created session {name}"));
                Ok(())
            }
            ImportCommands::UploadPart { name, part, file } => {
                let data = std::fs::read(file)?;
                service.upload_part(name, part, data).await?;
                self.confirm(format_args!("uploaded part {part} to {name}"));
                Ok(())
            }
            ImportCommands::DeletePart { name, part } => {
                service.delete_part(name, part).await?;
                self.confirm(format_args!("deleted part {part} from {name}"));
                Ok(())
            }
            ImportCommands::Parts { name } => self.emit(&service.list_parts(name).await?),
            ImportCommands::Freeze { name } => {
                service.freeze(name).await?;
                self.confirm(format_args!("froze session {name}"));
                Ok(())
            }
            ImportCommands::Unfreeze { name } => {
                service.unfreeze(name).await?;
                self.confirm(format_args!("unfroze session {name}"));
                Ok(())
            }
            ImportCommands::Perform { name } => self.emit(&service.perform(name).await?),
            ImportCommands::Commit { name } => {
                service.commit(name).await?;
                self.confirm(format_args!("committed session {name}"));
                Ok(())
            }
            ImportCommands::Delete { name } => {
                service.delete(name).await?;
                self.confirm(format_args!("deleted session {name}"));
                Ok(())
            }
        }
    }

    // ========================================================================
    // CDP surface
    // ========================================================================

    async fn audience(&self, client: &Client, command: &AudienceCommands) -> Result<()> {
        let service = client.cdp();
        match command {
            AudienceCommands::List => self.emit(&service.audiences().await?),
            AudienceCommands::Show { id } => self.emit(&service.audience(id).await?),
        }
    }

    async fn segment(&self, client: &Client, command: &SegmentCommands) -> Result<()> {
        let service = client.cdp();
        match command {
            SegmentCommands::List { audience } => self.emit(&service.segments(audience).await?),
            SegmentCommands::Show { audience, id } => {
                self.emit(&service.segment(audience, id).await?)
            }
            SegmentCommands::Create {
                audience,
                name,
                rule,
                description,
            } => {
                let rule: Value = serde_json::from_str(rule)
                    .map_err(|e| Error::config(format!("bad --rule JSON: {e}")))?;
                let request = SegmentRequest {
                    description: description.clone(),
                    ..SegmentRequest::new(name, rule)
                };
                self.emit(&service.create_segment(audience, &request).await?)
            }
            SegmentCommands::Delete { audience, id } => {
                service.delete_segment(audience, id).await?;
                self.confirm(format_args!("deleted segment {id}"));
                Ok(())
            }
        }
    }

    async fn activation(&self, client: &Client, command: &ActivationCommands) -> Result<()> {
        let service = client.cdp();
        match command {
            ActivationCommands::List { audience, segment } => {
                self.emit(&service.activations(audience, segment).await?)
            }
            ActivationCommands::Create {
                audience,
                segment,
                name,
                connection,
            } => {
                let request = ActivationRequest::new(name, connection);
                self.emit(&service.create_activation(audience, segment, &request).await?)
            }
            ActivationCommands::Run { id } => self.emit(&service.run_activation(id).await?),
        }
    }

    async fn journey(&self, client: &Client, command: &JourneyCommands) -> Result<()> {
        let service = client.cdp();
        match command {
            JourneyCommands::List { audience } => self.emit(&service.journeys(audience).await?),
            JourneyCommands::Show { id } => self.emit(&service.journey(id).await?),
            JourneyCommands::Pause { id } => self.emit(&service.pause_journey(id).await?),
            JourneyCommands::Resume { id } => self.emit(&service.resume_journey(id).await?),
        }
    }

    // ========================================================================
    // Workflow surface
    // ========================================================================

    async fn workflow(&self, client: &Client, command: &WorkflowCommands) -> Result<()> {
        let service = client.workflows();
        match command {
            WorkflowCommands::List { count } => self.emit(&service.list(*count).await?),
            WorkflowCommands::Show { id } => self.emit(&service.get(id).await?),
            WorkflowCommands::Attempts {
                workflow_id,
                status,
            } => {
                let params = AttemptListParams {
                    workflow_id: workflow_id.clone(),
                    status: status.clone(),
                };
                self.emit(&service.attempts(&params).await?)
            }
            WorkflowCommands::Attempt { id } => self.emit(&service.attempt(id).await?),
            WorkflowCommands::Start {
                workflow_id,
                session_time,
                params,
            } => {
                let session_time = session_time
                    .as_deref()
                    .map(FlexTime::parse)
                    .transpose()?;
                let params = params
                    .as_deref()
                    .map(serde_json::from_str::<Value>)
                    .transpose()
                    .map_err(|e| Error::config(format!("bad --params JSON: {e}")))?;
                let request = StartAttemptRequest {
                    session_time,
                    params,
                    ..StartAttemptRequest::new(workflow_id.clone())
                };
                self.emit(&service.start_attempt(&request).await?)
            }
            WorkflowCommands::Kill { id } => {
                service.kill_attempt(id).await?;
                self.confirm(format_args!("kill requested for attempt {id}"));
                Ok(())
            }
            WorkflowCommands::Schedules => self.emit(&service.schedules().await?),
            WorkflowCommands::Enable { id } => self.emit(&service.enable_schedule(id).await?),
            WorkflowCommands::Disable { id } => self.emit(&service.disable_schedule(id).await?),
        }
    }
}

/// Render a JSON value as indented key/value lines
fn print_pretty(value: &Value) {
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_pretty(item);
            }
        }
        Value::Object(map) => {
            for (key, field) in map {
                if field.is_null() {
                    continue;
                }
                println!("{key}: {}", render_scalar(field));
            }
        }
        other => println!("{}", render_scalar(other)),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("cascata").chain(args.iter().copied()))
    }

    #[test]
    fn test_config_file_fills_in_credentials() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"apikey": "1/filekey", "endpoint": "https://api.test.invalid"}}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let runner = Runner::new(cli(&["--config", &path, "database", "list"]));
        let config = runner.client_config().unwrap();

        assert_eq!(config.api_endpoint, "https://api.test.invalid");
        assert!(config.credentials.is_configured());
    }

    #[test]
    fn test_flag_overrides_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"apikey": "1/filekey"}}"#).unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let runner = Runner::new(cli(&[
            "--config",
            &path,
            "--apikey",
            "1/flagkey",
            "--endpoint",
            "https://flag.test.invalid",
            "database",
            "list",
        ]));
        let config = runner.client_config().unwrap();
        assert_eq!(config.api_endpoint, "https://flag.test.invalid");
    }

    #[test]
    fn test_bad_config_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let runner = Runner::new(cli(&["--config", &path, "database", "list"]));
        assert!(runner.client_config().is_err());
    }

    #[test]
    fn test_pretty_scalar_rendering() {
        assert_eq!(render_scalar(&serde_json::json!("text")), "text");
        assert_eq!(render_scalar(&serde_json::json!(42)), "42");
        assert_eq!(render_scalar(&serde_json::json!(true)), "true");
    }
}
