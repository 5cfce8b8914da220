//! External command template.

use crate::config::{LaunchConfig, PORT_PLACEHOLDER};

/// Program plus argument list, rendered per port.
///
/// Never passed through a shell, so a port string cannot inject commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &LaunchConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with every `{port}` replaced by `port`.
    pub fn render(&self, port: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(PORT_PLACEHOLDER, port))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_matches_http_server() {
        let template = CommandTemplate::from_config(&LaunchConfig::default());
        assert_eq!(template.program(), "python3");
        assert_eq!(template.render("8001"), vec!["-m", "http.server", "8001"]);
    }

    #[test]
    fn port_is_a_single_argument() {
        let template = CommandTemplate::new("python3", vec!["{port}".into()]);
        assert_eq!(template.render("8001; rm -rf /"), vec!["8001; rm -rf /"]);
    }

    #[test]
    fn embedded_placeholders_are_replaced() {
        let template = CommandTemplate::new(
            "server",
            vec!["--listen=127.0.0.1:{port}".into(), "--name".into(), "s{port}".into()],
        );
        assert_eq!(
            template.render("9000"),
            vec!["--listen=127.0.0.1:9000", "--name", "s9000"]
        );
    }
}
