use agent_first_storage::ConversationId;

pub const WELCOME_TITLE: &str = "Como posso ajudar você hoje?";
pub const WELCOME_BODY: &str = "Sou o Agent First, seu assistente inteligente. Pergunte qualquer \
coisa sobre negócios, tecnologia, produtividade e muito mais.";
pub const INPUT_PROMPT: &str = "Envie uma mensagem...";

pub const HELP_TEXT: &str = "\
/new            nova conversa
/topics         Menu Principal
/topic <id>     abre um tópico (sobre, agents, aprenda, precos)
/history        conversas anteriores
/select <id>    retoma uma conversa
/show           mostra a conversa ativa
/help           esta lista
/quit           sair
Qualquer outro texto é enviado como mensagem.";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Topics,
    Topic(String),
    History,
    Select(ConversationId),
    Show,
    Help,
    Quit,
    /// Plain text to submit; may be blank, the session decides.
    Submit(String),
    /// Slash command that is unknown or missing its argument.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(body) = trimmed.strip_prefix('/') else {
            return Self::Submit(line.to_string());
        };

        let (name, argument) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };

        match (name, argument) {
            ("new", "") => Self::New,
            ("topics" | "menu", "") => Self::Topics,
            ("topic", id) if !id.is_empty() => Self::Topic(id.to_string()),
            ("history", "") => Self::History,
            ("select", id) if !id.is_empty() => Self::Select(ConversationId::from(id)),
            ("show", "") => Self::Show,
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            _ => Self::Invalid(trimmed.to_string()),
        }
    }
}
