use std::{borrow::Cow, collections::HashMap};

use beancount_core::AccountType;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::classify::AccountMap;
use crate::error::ConfigurationError;

const BUILTIN_CONFIG: &str = include_str!("../accounts.yaml");

/// Per-provider account maps. Each provider section is an ordered mapping of
/// pattern to beancount account name, with a mandatory `DEFAULT` entry.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct Config {
    account_maps: HashMap<String, Mapping>,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigurationError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::from_yaml(BUILTIN_CONFIG)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for provider in self.account_maps.keys() {
            for (pattern, label) in self.entries(provider)? {
                beancount_account(label).map_err(|reason| ConfigurationError::InvalidAccount {
                    pattern: pattern.to_string(),
                    label: label.to_string(),
                    reason,
                })?;
            }
            self.account_map(provider)?;
        }
        Ok(())
    }

    pub fn account_map(&self, provider: &str) -> Result<AccountMap, ConfigurationError> {
        AccountMap::from_entries(self.entries(provider)?)
    }

    fn entries(&self, provider: &str) -> Result<Vec<(&str, &str)>, ConfigurationError> {
        self.account_maps
            .get(provider)
            .ok_or_else(|| ConfigurationError::MissingProvider(provider.to_string()))?
            .iter()
            .map(|(pattern, label)| Ok::<_, ConfigurationError>((as_str(pattern)?, as_str(label)?)))
            .collect()
    }
}

fn as_str(value: &Value) -> Result<&str, ConfigurationError> {
    value
        .as_str()
        .ok_or_else(|| ConfigurationError::NonStringEntry(format!("{value:?}")))
}

fn beancount_account(label: &str) -> Result<beancount_core::Account<'_>, String> {
    let mut parts = label.split(':');
    let ty = match parts.next() {
        Some("Assets") => AccountType::Assets,
        Some("Liabilities") => AccountType::Liabilities,
        Some("Equity") => AccountType::Equity,
        Some("Income") => AccountType::Income,
        Some("Expenses") => AccountType::Expenses,
        _ => {
            return Err(
                "Account must start with one of: Assets:, Liabilities:, Equity:, Income:, Expenses:"
                    .to_string(),
            )
        }
    };
    let parts: Vec<Cow<'_, str>> = parts.map(Cow::Borrowed).collect();
    if parts.is_empty() || parts.iter().any(|part| part.is_empty()) {
        return Err("Account must have at least one non-empty sub-account".to_string());
    }
    Ok(beancount_core::Account { ty, parts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        let config = Config::builtin().unwrap();
        for provider in ["alipay", "wechat", "cmb"] {
            let map = config.account_map(provider).unwrap();
            assert_eq!(map.unknown_account(), "Assets:Unknown");
        }
    }

    #[test]
    fn builtin_alipay_order() {
        let map = Config::builtin().unwrap().account_map("alipay").unwrap();
        let patterns: Vec<&str> = map.accounts().map(|(pattern, _)| pattern).take(3).collect();
        assert_eq!(
            patterns,
            vec!["中国移动|上海联通|科学上网", "酒店|宾馆|汉庭|华住", "爱车养车|小兔充充|出入境管理局"]
        );
        assert_eq!(map.classify("招商银行储蓄卡"), "Assets:Cash:CMBC-5189:Cash");
    }

    #[test]
    fn builtin_wechat_escaped_pattern() {
        let map = Config::builtin().unwrap().account_map("wechat").unwrap();
        assert_eq!(
            map.classify("招商银行(0035)"),
            "Liabilities:CreditCard:CMBC-0035"
        );
    }

    #[test]
    fn missing_default() {
        let config = Config::from_yaml(
            r#"
alipay:
  '餐饮美食': Expenses:EatAndDrink
"#,
        );
        assert!(matches!(config, Err(ConfigurationError::MissingDefault)));
    }

    #[test]
    fn invalid_account() {
        let config = Config::from_yaml(
            r#"
alipay:
  DEFAULT: Assets:Unknown
  '餐饮美食': Food
"#,
        );
        assert!(matches!(
            config,
            Err(ConfigurationError::InvalidAccount { .. })
        ));
    }

    #[test]
    fn non_string_entry() {
        let config = Config::from_yaml(
            r#"
alipay:
  DEFAULT: Assets:Unknown
  '餐饮美食': 5
"#,
        );
        assert!(matches!(config, Err(ConfigurationError::NonStringEntry(_))));
    }

    #[test]
    fn missing_provider() {
        let config = Config::from_yaml(
            r#"
alipay:
  DEFAULT: Assets:Unknown
"#,
        )
        .unwrap();
        assert!(matches!(
            config.account_map("wechat"),
            Err(ConfigurationError::MissingProvider(_))
        ));
    }

    #[test]
    fn malformed_yaml() {
        assert!(matches!(
            Config::from_yaml("alipay: ["),
            Err(ConfigurationError::Yaml(_))
        ));
    }

    #[test]
    fn test_beancount_account() {
        assert!(beancount_account("Assets:Cash:Alipay").is_ok());
        assert!(beancount_account("Liabilities:CreditCard:CMBC-0035").is_ok());
        assert!(beancount_account("Assets").is_err());
        assert!(beancount_account("Assets::Cash").is_err());
        assert!(beancount_account("Cash:Alipay").is_err());
    }
}
