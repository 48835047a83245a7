use colored::Colorize;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>,
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None,
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn cancelled() -> UxError {
    UxError::new("Initialization cancelled")
        .why("The existing config was kept as is")
}

pub fn not_a_terminal() -> UxError {
    UxError::new("Cannot prompt for missing values")
        .why("Standard input is not an interactive terminal")
        .fix("Run the command from a terminal")
        .fix("Or supply every value with flags or environment variables")
        .suggest(
            "stratus init --secret-key <uuid> --zone fr-par-1 --organization-id <uuid> --send-usage false",
        )
}

pub fn prompt_failed(reason: &str) -> UxError {
    UxError::new("Failed to read from the terminal").why(reason.to_string())
}

pub fn login_failed(reason: &str) -> UxError {
    UxError::new("Login failed")
        .why(reason.to_string())
        .fix("Check your email and password")
        .fix("Or create a secret key in the console and paste it instead")
        .suggest("stratus init --secret-key <uuid>")
}

pub fn two_factor_rejected() -> UxError {
    UxError::new("Two-factor code rejected")
        .why("The account service refused the code")
        .fix("Wait for a fresh code from your authenticator and try again")
        .suggest("stratus init")
}

pub fn unknown_zone(zone: &str, known: &[String]) -> UxError {
    UxError::new(format!("{zone} is an unknown zone"))
        .why(format!("Known zones are: {}", known.join(", ")))
        .fix("Pick one of the known zones")
        .suggest(format!("stratus init --zone {}", config::DEFAULT_ZONE))
}

pub fn invalid_credential(value: &str) -> UxError {
    UxError::new(format!("Invalid email or secret-key: '{value}'"))
        .why("Expected an email address or a UUID-shaped secret key")
}

pub fn config_unreadable(path: &str, reason: &str) -> UxError {
    UxError::new(format!("Cannot read existing config at {path}"))
        .why(reason.to_string())
        .fix("Fix or remove the file, then run init again")
        .suggest(format!("stratus init --config-path {path}"))
}

pub fn persist_failed(stage: &str, path: &str, reason: &str) -> UxError {
    UxError::new(format!("Failed to save {stage} config to {path}"))
        .why(reason.to_string())
        .fix("Check that the directory exists and is writable")
        .fix("Or write the config elsewhere with --config-path")
}

pub fn access_key_unavailable(reason: &str) -> UxError {
    UxError::new("Failed to retrieve Access Key for the given Secret Key.")
        .why(reason.to_string())
        .fix("Check that the secret key is valid and has not been revoked")
        .suggest("stratus init")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_fixes_in_order() {
        let err = UxError::new("what")
            .why("because")
            .fix("first")
            .fix("second")
            .suggest("stratus init");

        assert_eq!(err.to_string(), "what");
        assert_eq!(err.why.as_deref(), Some("because"));
        assert_eq!(err.how_to_fix, vec!["first", "second"]);
        assert_eq!(err.suggested_command.as_deref(), Some("stratus init"));
    }

    #[test]
    fn test_display_does_not_panic() {
        access_key_unavailable("404 not found").display();
    }

    #[test]
    fn test_unknown_zone_lists_known_zones() {
        let known = vec!["fr-par-1".to_string(), "nl-ams-1".to_string()];
        let err = unknown_zone("de-fra-1", &known);
        assert_eq!(err.what, "de-fra-1 is an unknown zone");
        assert!(err.why.as_ref().unwrap().contains("fr-par-1, nl-ams-1"));
    }

    #[test]
    fn test_access_key_unavailable_message() {
        let err = access_key_unavailable("token not found");
        assert_eq!(
            err.what,
            "Failed to retrieve Access Key for the given Secret Key."
        );
        assert_eq!(err.why.as_deref(), Some("token not found"));
    }

    #[test]
    fn test_persist_failed_names_stage_and_path() {
        let err = persist_failed("access key", "/tmp/config.yaml", "disk full");
        assert!(err.what.contains("access key"));
        assert!(err.what.contains("/tmp/config.yaml"));
    }

    #[test]
    fn test_not_a_terminal_suggests_flags() {
        let err = not_a_terminal();
        assert!(err.suggested_command.unwrap().contains("--secret-key"));
    }

    #[test]
    fn test_login_failed_carries_reason() {
        let err = login_failed("invalid credentials");
        assert_eq!(err.why.as_deref(), Some("invalid credentials"));
        assert_eq!(err.how_to_fix.len(), 2);
    }
}
