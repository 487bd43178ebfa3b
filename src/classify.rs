use regex::Regex;

use crate::error::ConfigurationError;

pub const DEFAULT_KEY: &str = "DEFAULT";

/// A pattern with its precompiled regex, if the pattern is a valid one.
#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    compiled_regex: Option<Regex>,
    account: String,
}

impl Rule {
    fn matches(&self, keyword: &str) -> bool {
        let found = self
            .compiled_regex
            .as_ref()
            .is_some_and(|re| re.is_match(keyword));
        found || self.pattern == keyword
    }
}

/// Ordered pattern to account lookup. Rules are tried top to bottom and the
/// first one that matches wins; the default account is used when none does.
#[derive(Debug, Clone)]
pub struct AccountMap {
    rules: Vec<Rule>,
    default_account: String,
}

impl AccountMap {
    pub fn from_entries<K, V>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ConfigurationError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut rules = Vec::new();
        let mut default_account = None;
        for (pattern, account) in entries {
            let pattern = pattern.into();
            let account = account.into();
            if pattern == DEFAULT_KEY {
                default_account.get_or_insert(account);
                continue;
            }
            let compiled_regex = match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    log::warn!("Pattern '{pattern}' is not a valid regex, only exact matches will be used: {err}");
                    None
                }
            };
            rules.push(Rule {
                pattern,
                compiled_regex,
                account,
            });
        }
        let default_account = default_account.ok_or(ConfigurationError::MissingDefault)?;
        Ok(Self {
            rules,
            default_account,
        })
    }

    pub fn classify(&self, keyword: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(keyword))
            .map(|rule| rule.account.as_str())
            .unwrap_or(self.default_account.as_str())
    }

    /// The account returned when nothing matches.
    pub fn unknown_account(&self) -> &str {
        &self.default_account
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|rule| (rule.pattern.as_str(), rule.account.as_str()))
            .chain(std::iter::once((DEFAULT_KEY, self.default_account.as_str())))
    }
}
