// ABOUTME: Configuration options for the lyrics pipeline and the fluent ClientBuilder.
// ABOUTME: Extra noise selectors and boilerplate rules are validated when the client is built.

use crate::client::Client;
use crate::error::ExtractError;
use crate::extractors::compiled::is_valid_selector;
use crate::text::BoilerplateRule;

/// Configuration options for the extraction client.
#[derive(Debug, Clone)]
pub struct Options {
    /// CSS selectors removed from panes and paragraph-tab fallbacks, after the built-ins.
    pub noise_selectors: Vec<String>,
    /// Cleaner rules applied after the built-in ones, in order.
    pub boilerplate: Vec<BoilerplateRule>,
    /// Attach diagnostics to successful results.
    pub keep_diagnostics: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            noise_selectors: Vec::new(),
            boilerplate: Vec::new(),
            keep_diagnostics: true,
        }
    }
}

/// A boilerplate rule as given to the builder, compiled in `build()`.
#[derive(Debug, Clone)]
struct PendingRule {
    intent: String,
    pattern: String,
    replacement: String,
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    opts: Options,
    pending: Vec<PendingRule>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove elements matching `css` before reading pane text.
    pub fn noise_selector(mut self, css: impl Into<String>) -> Self {
        self.opts.noise_selectors.push(css.into());
        self
    }

    /// Delete every match of `pattern` from cleaned text.
    pub fn boilerplate(self, intent: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.boilerplate_replace(intent, pattern, "")
    }

    /// Replace every match of `pattern` in cleaned text with `replacement`.
    pub fn boilerplate_replace(
        mut self,
        intent: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.pending.push(PendingRule {
            intent: intent.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        });
        self
    }

    /// Add an already compiled rule.
    pub fn boilerplate_rule(mut self, rule: BoilerplateRule) -> Self {
        self.opts.boilerplate.push(rule);
        self
    }

    /// Whether successful results carry diagnostics.
    pub fn keep_diagnostics(mut self, keep: bool) -> Self {
        self.opts.keep_diagnostics = keep;
        self
    }

    /// Validate the configuration and build the Client.
    pub fn build(mut self) -> Result<Client, ExtractError> {
        if let Some(bad) = self
            .opts
            .noise_selectors
            .iter()
            .find(|css| !is_valid_selector(css))
        {
            return Err(ExtractError::config(
                "noise_selector",
                Some(anyhow::anyhow!("invalid selector {:?}", bad)),
            ));
        }

        for rule in self.pending {
            let compiled = BoilerplateRule::new(rule.intent, &rule.pattern, rule.replacement)
                .map_err(|e| ExtractError::config("boilerplate", Some(e.into())))?;
            self.opts.boilerplate.push(compiled);
        }

        Ok(Client::new(self.opts))
    }
}
