#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: String,
    pub url: Option<String>,
}

/// Answer to a yes/no/quit prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
    Quit,
}

impl Decision {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Decision::Yes,
            "q" | "quit" => Decision::Quit,
            _ => Decision::No,
        }
    }
}

/// Answer to the "existing ticket?" prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketChoice {
    Existing(String),
    None,
    Quit,
}

impl TicketChoice {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            TicketChoice::None
        } else if trimmed.eq_ignore_ascii_case("q") {
            TicketChoice::Quit
        } else {
            TicketChoice::Existing(trimmed.to_string())
        }
    }
}
