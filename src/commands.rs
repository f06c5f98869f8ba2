//! Subcommands of the `dmc` binary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend-facing command builds one [`ApiClient`] from the shared
//! [`ApiArgs`] and the stored session, runs, and prints plain text. The
//! commands follow the portal's flows: `chat ask` without a conversation
//! creates one first, exactly like posting on the `new` chat route.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use wire::endpoints::PdfListQuery;
use wire::models::{
    ConversationDetail, EmbeddingStatuses, PdfStatesPage, RagQueryRequest, StatusFilter, scoring_percent,
};
use wire::poll::{DEFAULT_INTERVAL, PollPolicy};

use crate::api::ApiClient;
use crate::config::{self, ApiArgs, ApiConfig};
use crate::error::CliError;
use crate::poll::{WatchOutcome, watch};
use crate::session::{Session, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "dmc", about = "Device manual console: portal host and backend CLI")]
pub struct Cli {
    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Host the web portal.
    Serve,
    /// Sign in and store the token.
    Login(LoginCommand),
    /// Forget the stored token.
    Logout,
    Ocr(OcrCommand),
    Pdf(PdfCommand),
    Chat(ChatCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PortalKind {
    Admin,
    Client,
}

impl PortalKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }
}

#[derive(Args, Debug)]
pub struct LoginCommand {
    #[arg(value_enum)]
    pub portal: PortalKind,
    /// Admin username or client email.
    #[arg(long, short)]
    pub user: String,
    #[arg(long, env = "DMC_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct OcrCommand {
    #[command(subcommand)]
    pub command: OcrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OcrSubcommand {
    /// Whether the extraction agent is busy.
    Status(WatchArgs),
    /// Run OCR on an uploaded PDF.
    Extract { pdf_id: i64 },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct WatchArgs {
    /// Keep polling until the agent is idle.
    #[arg(long)]
    pub watch: bool,
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_secs())]
    pub interval_secs: u64,
    /// Interval multiplier after each busy answer.
    #[arg(long, default_value_t = 1.0)]
    pub backoff: f64,
    #[arg(long)]
    pub max_interval_secs: Option<u64>,
    /// Give up after this much total waiting.
    #[arg(long)]
    pub max_wait_secs: Option<u64>,
}

impl WatchArgs {
    pub fn policy(&self) -> PollPolicy {
        PollPolicy::fixed(Duration::from_secs(self.interval_secs.max(1)))
            .with_backoff(self.backoff, self.max_interval_secs.map(Duration::from_secs))
            .with_max_wait(self.max_wait_secs.map(Duration::from_secs))
    }
}

#[derive(Args, Debug)]
pub struct PdfCommand {
    #[command(subcommand)]
    pub command: PdfSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PdfSubcommand {
    /// Upload a PDF manual for an existing device.
    Upload {
        #[arg(long)]
        device_id: i64,
        file: PathBuf,
        /// Name stored with the PDF; defaults to the file name without `.pdf`.
        #[arg(long)]
        name: Option<String>,
    },
    /// Tracking list.
    List(PdfListArgs),
    /// Per-page embedding status.
    Embedding { pdf_id: i64 },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PdfListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value = "")]
    pub query: String,
    #[arg(long, default_value = "*")]
    pub brand: String,
    #[arg(long, default_value = "*")]
    pub category: String,
    #[arg(long, default_value = "all", value_parser = parse_status)]
    pub status: StatusFilter,
}

impl PdfListArgs {
    pub fn to_query(&self) -> PdfListQuery {
        PdfListQuery {
            page: self.page.max(1),
            name: self.query.clone(),
            brand: self.brand.clone(),
            category: self.category.clone(),
            status: self.status,
        }
    }
}

fn parse_status(raw: &str) -> Result<StatusFilter, String> {
    match raw {
        "all" | "in-progress" | "complete" => Ok(StatusFilter::parse(raw)),
        other => Err(format!("unknown status `{other}` (expected all, in-progress or complete)")),
    }
}

#[derive(Args, Debug)]
pub struct ChatCommand {
    #[command(subcommand)]
    pub command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChatSubcommand {
    /// Ask a question; starts a new conversation unless one is given.
    Ask {
        #[arg(long)]
        conversation: Option<String>,
        #[arg(long)]
        device: Option<i64>,
        query: String,
    },
    /// Print a stored conversation.
    Show { conversation_id: String },
    /// List your conversations.
    List,
}

// =============================================================================
// DISPATCH
// =============================================================================

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::from_args(cli.api);
    let sessions = SessionStore::new(&config.session_file);
    match cli.command {
        Command::Serve => {
            let port = config::port_from(std::env::var("PORT").ok().as_deref())?;
            crate::web::serve(port).await
        }
        Command::Login(login) => run_login(&config, &sessions, login).await,
        Command::Logout => {
            if sessions.clear()? {
                println!("signed out");
            } else {
                println!("no stored session");
            }
            Ok(())
        }
        Command::Ocr(ocr) => run_ocr(&signed_in_client(&config, &sessions)?, ocr.command).await,
        Command::Pdf(pdf) => run_pdf(&signed_in_client(&config, &sessions)?, pdf.command).await,
        Command::Chat(chat) => run_chat(&client(&config, &sessions)?, chat.command).await,
    }
}

fn client(config: &ApiConfig, sessions: &SessionStore) -> Result<ApiClient, CliError> {
    let token = sessions.resolve_token(config.token.as_deref())?;
    ApiClient::new(config, token)
}

/// Admin commands have no anonymous mode.
fn signed_in_client(config: &ApiConfig, sessions: &SessionStore) -> Result<ApiClient, CliError> {
    let token = sessions.resolve_token(config.token.as_deref())?.ok_or(CliError::MissingToken)?;
    ApiClient::new(config, Some(token))
}

async fn run_login(config: &ApiConfig, sessions: &SessionStore, login: LoginCommand) -> Result<(), CliError> {
    let api = ApiClient::new(config, None)?;
    let token = match login.portal {
        PortalKind::Admin => api.admin_login(&login.user, &login.password).await?,
        PortalKind::Client => api.client_login(&login.user, &login.password).await?,
    };
    sessions.save(&Session { token: Some(token), portal: Some(login.portal.as_str().to_owned()) })?;
    tracing::info!(portal = login.portal.as_str(), path = %sessions.path().display(), "session stored");
    println!("signed in as {} ({})", login.user, login.portal.as_str());
    Ok(())
}

async fn run_ocr(api: &ApiClient, command: OcrSubcommand) -> Result<(), CliError> {
    match command {
        OcrSubcommand::Status(args) if !args.watch => {
            println!("{}", agent_label(api.agent_is_extracting().await?));
            Ok(())
        }
        OcrSubcommand::Status(args) => {
            let outcome = watch(args.policy(), || api.agent_is_extracting(), |busy| println!("{}", agent_label(busy)))
                .await;
            match outcome {
                WatchOutcome::Idle { polls } => {
                    tracing::debug!(polls, "agent idle");
                    Ok(())
                }
                WatchOutcome::TimedOut { waited } => Err(CliError::PollTimedOut(waited)),
            }
        }
        OcrSubcommand::Extract { pdf_id } => {
            if api.agent_is_extracting().await? {
                return Err(CliError::InvalidArgument("the agent is already extracting; try again later".to_owned()));
            }
            tracing::info!(pdf_id, "ocr started");
            let message = api.extract_pdf(pdf_id).await?;
            println!("{}", message.unwrap_or_else(|| format!("pdf {pdf_id} extracted")));
            Ok(())
        }
    }
}

async fn run_pdf(api: &ApiClient, command: PdfSubcommand) -> Result<(), CliError> {
    match command {
        PdfSubcommand::Upload { device_id, file, name } => {
            let name = upload_name(&file, name.as_deref())?;
            let bytes = tokio::fs::read(&file)
                .await
                .map_err(|source| CliError::Input { path: file.display().to_string(), source })?;
            let ticket = api.pdf_upload_ticket(device_id, &name).await?;
            api.put_pdf(&ticket.signed_url, bytes).await?;
            println!("{}", ticket.pdf_id);
            Ok(())
        }
        PdfSubcommand::List(args) => {
            let page = api.pdf_states(&args.to_query()).await?;
            for line in pdf_rows(&page) {
                println!("{line}");
            }
            Ok(())
        }
        PdfSubcommand::Embedding { pdf_id } => {
            let statuses = api.embedding_statuses(pdf_id).await?;
            for line in embedding_lines(&statuses) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

async fn run_chat(api: &ApiClient, command: ChatSubcommand) -> Result<(), CliError> {
    match command {
        ChatSubcommand::Ask { conversation, device, query } => {
            let query = query.trim().to_owned();
            if query.is_empty() {
                return Err(CliError::InvalidArgument("query must not be blank".to_owned()));
            }
            let conversation = match conversation {
                Some(id) => Some(id),
                None => {
                    let stored = api.store_conversation(device, &query).await?;
                    eprintln!("conversation {} ({})", stored.conversation_id, stored.to_conversation().title);
                    Some(stored.conversation_id)
                }
            };
            let request = ask_request(&query, conversation, device, api.has_token());
            let answer = api.rag_query(&request).await?;
            println!("{}", answer.response);
            if let Some(images) = answer.images_ids.filter(|ids| !ids.is_empty()) {
                println!("images: {images:?}");
            }
            Ok(())
        }
        ChatSubcommand::Show { conversation_id } => {
            let detail = api.conversation_detail(&conversation_id).await?;
            print!("{}", transcript(&detail));
            Ok(())
        }
        ChatSubcommand::List => {
            let list = api.list_conversations().await?;
            for summary in list.conversations.unwrap_or_default() {
                let c = summary.into_conversation();
                println!("{}\t{}\t{}\t{}", c.id, c.title, c.device_name, c.timestamp);
            }
            Ok(())
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn agent_label(busy: bool) -> &'static str {
    if busy { "extracting" } else { "idle" }
}

/// The conversation id is only sent with a token; anonymous questions are
/// answered without being stored.
pub fn ask_request(query: &str, conversation: Option<String>, device: Option<i64>, has_token: bool) -> RagQueryRequest {
    RagQueryRequest {
        query: query.to_owned(),
        conversation_id: conversation.filter(|_| has_token),
        device_id: device,
    }
}

pub fn upload_name(file: &Path, explicit: Option<&str>) -> Result<String, CliError> {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return Ok(name.to_owned());
    }
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidArgument(format!("{} has no file name", file.display())))?;
    Ok(file_name.strip_suffix(".pdf").unwrap_or(file_name).to_owned())
}

pub fn pdf_rows(page: &PdfStatesPage) -> Vec<String> {
    let mut lines: Vec<String> = page
        .rows()
        .iter()
        .map(|row| {
            let scoring = row.pdf_scoring.unwrap_or(0);
            format!(
                "{}\t{}\t{}\t{}\t{}%",
                row.pdf_id,
                row.display_name(),
                row.brand.as_deref().unwrap_or("Unknown"),
                row.stage().label(),
                scoring_percent(scoring)
            )
        })
        .collect();
    if page.has_prev || page.has_next {
        lines.push(format!("(more pages: prev={} next={})", page.has_prev, page.has_next));
    }
    lines
}

pub fn embedding_lines(statuses: &EmbeddingStatuses) -> Vec<String> {
    let mut lines: Vec<String> = statuses
        .pages()
        .iter()
        .map(|p| format!("page {}\t{}", p.page_number, if p.done { "done" } else { "pending" }))
        .collect();
    lines.push(if statuses.all_done() { "all pages embedded".to_owned() } else { "embedding incomplete".to_owned() });
    lines
}

pub fn transcript(detail: &ConversationDetail) -> String {
    let mut out = format!("# {}\n", detail.title.as_deref().unwrap_or("Untitled"));
    for message in detail.messages() {
        let who = if message.is_ai() { "ai" } else { "you" };
        out.push_str(&format!("[{}] {who}: {}\n", message.timestamp, message.content));
    }
    out
}
