//! CLI commands and argument parsing

use crate::models::{JobStatus, QueryEngine};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cascata platform CLI
#[derive(Parser, Debug)]
#[command(name = "cascata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API key (falls back to the config file, then CASCATA_API_KEY)
    #[arg(short = 'k', long, global = true)]
    pub apikey: Option<String>,

    /// Core API endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// CDP API endpoint
    #[arg(long, global = true)]
    pub cdp_endpoint: Option<String>,

    /// Workflow API endpoint
    #[arg(long, global = true)]
    pub workflow_endpoint: Option<String>,

    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable key/value lines
    Pretty,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage databases
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },

    /// Manage tables
    Table {
        #[command(subcommand)]
        command: TableCommands,
    },

    /// Issue a query job and optionally wait for its result
    Query {
        /// Database to run against
        database: String,

        /// SQL text
        query: String,

        /// Query engine
        #[arg(short, long, default_value = "trino")]
        engine: QueryEngine,

        /// Scheduling priority (-2 lowest to 2 highest)
        #[arg(short, long)]
        priority: Option<i32>,

        /// Poll until the job finishes, then stream the result lines
        #[arg(short, long)]
        wait: bool,
    },

    /// Inspect and manage jobs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Manage account users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage access-control policies
    Policy {
        #[command(subcommand)]
        command: PolicyCommands,
    },

    /// Manage bulk import sessions
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },

    /// Inspect CDP audiences
    Audience {
        #[command(subcommand)]
        command: AudienceCommands,
    },

    /// Manage CDP segments
    Segment {
        #[command(subcommand)]
        command: SegmentCommands,
    },

    /// Manage CDP activations
    Activation {
        #[command(subcommand)]
        command: ActivationCommands,
    },

    /// Manage CDP journeys
    Journey {
        #[command(subcommand)]
        command: JourneyCommands,
    },

    /// Manage workflows, attempts, and schedules
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
}

/// Database subcommands
#[derive(Subcommand, Debug)]
pub enum DatabaseCommands {
    /// List all databases
    List,
    /// Create a database
    Create {
        /// Database name
        name: String,
    },
    /// Delete a database and everything in it
    Delete {
        /// Database name
        name: String,
    },
}

/// Table subcommands
#[derive(Subcommand, Debug)]
pub enum TableCommands {
    /// List the tables of a database
    List {
        /// Database name
        database: String,
    },
    /// Create a log table
    Create {
        /// Database name
        database: String,
        /// Table name
        table: String,
    },
    /// Update mutable table attributes
    Update {
        /// Database name
        database: String,
        /// Table name
        table: String,
        /// Retention in days (0 = keep forever)
        #[arg(long)]
        expire_days: Option<u32>,
        /// Block deletion
        #[arg(long)]
        delete_protected: Option<bool>,
    },
    /// Delete a table
    Delete {
        /// Database name
        database: String,
        /// Table name
        table: String,
    },
    /// Atomically swap the contents of two tables
    Swap {
        /// Database name
        database: String,
        /// First table
        table1: String,
        /// Second table
        table2: String,
    },
}

/// Job subcommands
#[derive(Subcommand, Debug)]
pub enum JobCommands {
    /// List jobs, newest first
    List {
        /// List from this job index
        #[arg(long)]
        from: Option<u64>,
        /// List up to this job index
        #[arg(long)]
        to: Option<u64>,
        /// Only jobs in this state
        #[arg(long)]
        status: Option<JobStatus>,
    },
    /// Full detail of one job
    Show {
        /// Job id
        id: String,
    },
    /// Lifecycle state of one job
    Status {
        /// Job id
        id: String,
    },
    /// Kill a job
    Kill {
        /// Job id
        id: String,
    },
    /// Stream a finished job's result lines to stdout
    Result {
        /// Job id
        id: String,
    },
}

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List the account's users
    List,
    /// Invite a user
    Create {
        /// User name
        name: String,
        /// Email address
        email: String,
    },
    /// Remove a user
    Delete {
        /// User name
        name: String,
    },
    /// List a user's API keys
    Apikeys {
        /// User name
        name: String,
    },
}

/// Policy subcommands
#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// List all policies
    List,
    /// One policy by id
    Show {
        /// Policy id
        id: u64,
    },
    /// Create a policy
    Create {
        /// Policy name
        name: String,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a policy
    Delete {
        /// Policy id
        id: u64,
    },
    /// Attach a user to a policy
    Attach {
        /// Policy id
        policy_id: u64,
        /// User id
        user_id: u64,
    },
    /// Detach a user from a policy
    Detach {
        /// Policy id
        policy_id: u64,
        /// User id
        user_id: u64,
    },
}

/// Bulk import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// List the account's sessions
    List,
    /// One session by name
    Show {
        /// Session name
        name: String,
    },
    /// Create a session targeting a table
    Create {
        /// Session name
        name: String,
        /// Target database
        database: String,
        /// Target table
        table: String,
    },
    /// Upload one part from a file
    UploadPart {
        /// Session name
        name: String,
        /// Part name
        part: String,
        /// File holding the part's bytes
        file: PathBuf,
    },
    /// Delete one uploaded part
    DeletePart {
        /// Session name
        name: String,
        /// Part name
        part: String,
    },
    /// List a session's uploaded parts
    Parts {
        /// Session name
        name: String,
    },
    /// Block further part uploads
    Freeze {
        /// Session name
        name: String,
    },
    /// Reopen a frozen session for uploads
    Unfreeze {
        /// Session name
        name: String,
    },
    /// Run the validation/conversion job over the uploaded parts
    Perform {
        /// Session name
        name: String,
    },
    /// Commit performed data into the target table
    Commit {
        /// Session name
        name: String,
    },
    /// Delete a session
    Delete {
        /// Session name
        name: String,
    },
}

/// Audience subcommands
#[derive(Subcommand, Debug)]
pub enum AudienceCommands {
    /// List all audiences
    List,
    /// One audience by id
    Show {
        /// Audience id
        id: String,
    },
}

/// Segment subcommands
#[derive(Subcommand, Debug)]
pub enum SegmentCommands {
    /// List an audience's segments
    List {
        /// Audience id
        audience: String,
    },
    /// One segment by id
    Show {
        /// Audience id
        audience: String,
        /// Segment id
        id: String,
    },
    /// Create a segment
    Create {
        /// Audience id
        audience: String,
        /// Segment name
        name: String,
        /// Filter rule as JSON
        #[arg(long)]
        rule: String,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a segment
    Delete {
        /// Audience id
        audience: String,
        /// Segment id
        id: String,
    },
}

/// Activation subcommands
#[derive(Subcommand, Debug)]
pub enum ActivationCommands {
    /// List a segment's activations
    List {
        /// Audience id
        audience: String,
        /// Segment id
        segment: String,
    },
    /// Create an activation
    Create {
        /// Audience id
        audience: String,
        /// Segment id
        segment: String,
        /// Activation name
        name: String,
        /// Destination connection id
        connection: String,
    },
    /// Trigger an activation run now
    Run {
        /// Activation id
        id: String,
    },
}

/// Journey subcommands
#[derive(Subcommand, Debug)]
pub enum JourneyCommands {
    /// List an audience's journeys
    List {
        /// Audience id
        audience: String,
    },
    /// One journey by id
    Show {
        /// Journey id
        id: String,
    },
    /// Pause a running journey
    Pause {
        /// Journey id
        id: String,
    },
    /// Resume a paused journey
    Resume {
        /// Journey id
        id: String,
    },
}

/// Workflow subcommands
#[derive(Subcommand, Debug)]
pub enum WorkflowCommands {
    /// List workflows
    List {
        /// Cap the number returned
        #[arg(long)]
        count: Option<u32>,
    },
    /// One workflow by id
    Show {
        /// Workflow id
        id: String,
    },
    /// List attempts, newest first
    Attempts {
        /// Only attempts of this workflow
        #[arg(long)]
        workflow_id: Option<String>,
        /// Only attempts in this state (running, done)
        #[arg(long)]
        status: Option<String>,
    },
    /// One attempt by id
    Attempt {
        /// Attempt id
        id: String,
    },
    /// Start a new attempt of a workflow
    Start {
        /// Workflow id
        workflow_id: String,
        /// Logical session time (RFC3339 or epoch seconds)
        #[arg(long)]
        session_time: Option<String>,
        /// Parameters as JSON
        #[arg(long)]
        params: Option<String>,
    },
    /// Kill a running attempt
    Kill {
        /// Attempt id
        id: String,
    },
    /// List all schedules
    Schedules,
    /// Enable a schedule
    Enable {
        /// Schedule id
        id: String,
    },
    /// Disable a schedule
    Disable {
        /// Schedule id
        id: String,
    },
}
