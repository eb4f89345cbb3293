//! REPL command parsing.

use finpanel_core::loan::LoanField;
use finpanel_core::route::ServiceChoice;
use finpanel_core::session::LoginMethod;

/// Slash commands offered for completion.
pub const COMMANDS: &[&str] = &[
    "/advisor", "/analysis", "/form", "/go", "/health", "/help", "/home", "/loan", "/logout",
    "/set", "/show", "/submit", "/symbol",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login(LoginMethod),
    Logout,
    Go(String),
    Switch(ServiceChoice),
    Home,
    Show,
    SetField(LoanField, String),
    Form,
    Submit,
    Symbol(String),
    Health,
    Help,
    Quit,
    /// Free text for the chat on screen.
    Message(String),
}

/// Parses one input line. Errors are usage messages for the user.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return Ok(Command::Quit);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "login" => {
            // The password is the rest of the line, inner spacing intact.
            let (email, password) = rest
                .split_once(char::is_whitespace)
                .map(|(email, password)| (email, password.trim_start()))
                .unwrap_or((rest, ""));
            Ok(Command::Login(LoginMethod::Password {
                email: email.to_string(),
                password: password.to_string(),
            }))
        }
        "oauth" => Ok(Command::Login(LoginMethod::OAuth {
            credential: rest.to_string(),
        })),
        "/logout" => Ok(Command::Logout),
        "/go" if rest.is_empty() => Err("Usage: /go <path>".to_string()),
        "/go" => Ok(Command::Go(rest.to_string())),
        "/home" => Ok(Command::Home),
        "/advisor" | "/analysis" | "/loan" => head[1..]
            .parse::<ServiceChoice>()
            .map(Command::Switch),
        "/show" => Ok(Command::Show),
        "/set" => {
            let (field, value) = rest
                .split_once('=')
                .map(|(field, value)| (field.trim(), value.trim()))
                .ok_or_else(|| "Usage: /set <field>=<value>".to_string())?;
            let field = field.parse::<LoanField>().map_err(|e| e.to_string())?;
            Ok(Command::SetField(field, value.to_string()))
        }
        "/form" => Ok(Command::Form),
        "/submit" => Ok(Command::Submit),
        "/symbol" if rest.is_empty() => Err("Usage: /symbol <company>".to_string()),
        "/symbol" => Ok(Command::Symbol(rest.to_string())),
        "/health" => Ok(Command::Health),
        "/help" => Ok(Command::Help),
        other if other.starts_with('/') => Err(format!("Unknown command: {}", other)),
        _ => Ok(Command::Message(line.to_string())),
    }
}

pub const HELP: &str = "\
login <email> <password>   sign in with the password form
oauth <credential>         sign in through the identity provider
/logout                    sign out
/home                      open the landing page
/advisor /analysis /loan   switch between tools
/go <path>                 open a path (e.g. /go /loan-approver)
/show                      show the current view again
/symbol <company>          look up a ticker (stock analysis)
/set <field>=<value>       edit a loan form field
/form                      show the loan form
/submit                    submit the loan application
/health                    check the backend
quit                       leave";
