//! Requester classification and content negotiation.

/// User-agent substrings (lowercase) identifying command-line clients.
const CLI_AGENTS: &[&str] = &[
    "curl/",
    "wget/",
    "httpie/",
    "lwp-request",
    "python-requests/",
    "python-urllib",
    "go-http-client",
    "rust-hyper",
    "libcurl",
];

/// Whether a requester is a scripting client or an interactive browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    Cli,
    Browser,
}

impl ClientKind {
    /// Classify from the `User-Agent` header.
    ///
    /// A missing or empty identity counts as a CLI client.
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        let Some(agent) = user_agent.map(str::trim).filter(|a| !a.is_empty()) else {
            return Self::Cli;
        };

        let agent = agent.to_lowercase();
        if CLI_AGENTS.iter().any(|cli| agent.contains(cli)) {
            Self::Cli
        } else {
            Self::Browser
        }
    }

    pub fn is_cli(self) -> bool {
        self == Self::Cli
    }
}

/// Format of the machine tool list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// One canonical tool name per line.
    Text,
    /// Structured listing with metadata.
    Json,
}

impl ListFormat {
    /// Pick the format from the `Accept` header: anything mentioning `json`
    /// gets JSON.
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(accept) if accept.to_lowercase().contains("json") => Self::Json,
            _ => Self::Text,
        }
    }
}
