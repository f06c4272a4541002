use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agent_first::command::{HELP_TEXT, INPUT_PROMPT};
use agent_first::settings::DEFAULT_LOG_FILTER;
use agent_first::{
    ChatSession, ChatSettings, Command, IgnoreReason, SettingsError, SubmitOutcome, transcript,
};
use agent_first_storage::ConversationId;
use clap::Parser;
use snafu::{ResultExt, Snafu};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agent-first")]
#[command(about = "Agent First chat session in the terminal", long_about = None)]
struct Cli {
    /// Settings file (defaults to <config dir>/agent-first/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the reply delay for this run, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Write the effective settings to the settings file and exit
    #[arg(long)]
    write_config: bool,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
enum CliError {
    #[snafu(display("failed to read input on `{stage}`: {source}"))]
    ReadInput {
        stage: &'static str,
        source: std::io::Error,
    },
    #[snafu(display("failed to write output on `{stage}`: {source}"))]
    WriteOutput {
        stage: &'static str,
        source: std::io::Error,
    },
    #[snafu(display("settings error on `{stage}`: {source}"))]
    Settings {
        stage: &'static str,
        source: SettingsError,
    },
}

type CliResult<T> = Result<T, CliError>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(ChatSettings::default_config_path);

    // Extract before installing the subscriber so `log_filter` can take effect;
    // a failure is reported once logging is up.
    let extracted = ChatSettings::extract(&config_path);
    let fallback_filter = extracted
        .as_ref()
        .map(|settings| settings.log_filter.as_str())
        .unwrap_or(DEFAULT_LOG_FILTER);
    init_tracing(fallback_filter);

    let settings = match extracted {
        Ok(settings) => {
            tracing::info!(
                path = ?config_path,
                response_delay_ms = settings.response_delay_ms,
                "settings loaded"
            );
            settings
        }
        Err(error) => {
            tracing::warn!("{error}. using defaults");
            ChatSettings::default()
        }
    };

    match run(cli, &config_path, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(fallback_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config_path: &Path, mut settings: ChatSettings) -> CliResult<()> {
    let mut output = tokio::io::stdout();

    if let Some(delay_ms) = cli.delay_ms {
        settings.response_delay_ms = delay_ms;
        settings.validate().context(SettingsSnafu {
            stage: "apply-delay-override",
        })?;
    }

    if cli.write_config {
        settings.save(config_path).context(SettingsSnafu {
            stage: "write-config",
        })?;
        let notice = format!("Configuração salva em {}\n", config_path.display());
        return emit(&mut output, &notice).await;
    }

    let session = ChatSession::builtin(&settings);
    emit(&mut output, &transcript::welcome()).await?;
    emit(&mut output, &format!("{INPUT_PROMPT} (/help para comandos)\n")).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        emit(&mut output, "> ").await?;
        let Some(line) = lines.next_line().await.context(ReadInputSnafu {
            stage: "read-command-line",
        })?
        else {
            break;
        };

        let command = Command::parse(&line);
        if command == Command::Quit {
            break;
        }
        let reply = handle(&session, command).await;
        if !reply.is_empty() {
            emit(&mut output, &reply).await?;
        }
    }

    tracing::debug!("input closed");
    Ok(())
}

async fn handle(session: &ChatSession, command: Command) -> String {
    match command {
        Command::New => {
            session.start_new_conversation().await;
            transcript::welcome()
        }
        Command::Topics => {
            let active = session.active_conversation_id().await;
            transcript::topics(
                &session.topics().await,
                active.as_ref().map(ConversationId::as_str),
            )
        }
        Command::Topic(topic_id) => match session.activate_topic(&topic_id).await {
            Some(conversation_id) => show(session, &conversation_id).await,
            None => format!("Tópico desconhecido: {topic_id}. Use /topics.\n"),
        },
        Command::History => {
            let active = session.active_conversation_id().await;
            transcript::history(
                &session.history().await,
                active.as_ref().map(ConversationId::as_str),
            )
        }
        Command::Select(conversation_id) => {
            if session.select_conversation(&conversation_id).await {
                show(session, &conversation_id).await
            } else {
                format!("Conversa não encontrada: {conversation_id}\n")
            }
        }
        Command::Show => match session.snapshot().await.active {
            Some(view) => transcript::conversation(&view),
            None => transcript::welcome(),
        },
        Command::Help => format!("{HELP_TEXT}\n"),
        Command::Quit => String::new(),
        Command::Submit(text) => submit(session, &text).await,
        Command::Invalid(input) => format!("Comando desconhecido: {input}. Use /help.\n"),
    }
}

async fn show(session: &ChatSession, conversation_id: &ConversationId) -> String {
    session
        .conversation(conversation_id)
        .await
        .map(|view| transcript::conversation(&view))
        .unwrap_or_default()
}

async fn submit(session: &ChatSession, text: &str) -> String {
    let pending = match session.submit_user_message(text).await {
        SubmitOutcome::Scheduled(pending) => pending,
        SubmitOutcome::Ignored(IgnoreReason::EmptyContent) => return String::new(),
        SubmitOutcome::Ignored(IgnoreReason::ResponsePending) => {
            return "Aguarde a resposta anterior.\n".to_string();
        }
        SubmitOutcome::Ignored(IgnoreReason::NotRecorded) => {
            return "Não foi possível registrar a mensagem.\n".to_string();
        }
    };

    let conversation_id = pending.conversation_id().clone();
    let Some(message_id) = pending.wait().await else {
        return String::new();
    };

    session
        .conversation(&conversation_id)
        .await
        .and_then(|view| {
            view.messages
                .iter()
                .find(|message| message.id == message_id)
                .map(transcript::message)
        })
        .unwrap_or_default()
}

async fn emit(output: &mut Stdout, text: &str) -> CliResult<()> {
    output
        .write_all(text.as_bytes())
        .await
        .context(WriteOutputSnafu {
            stage: "write-output",
        })?;
    output.flush().await.context(WriteOutputSnafu {
        stage: "flush-output",
    })
}
