use std::fmt;

use clap::ValueEnum;

use crate::assemble::convert;
use crate::classify::AccountMap;
use crate::error::ImportError;
use crate::import::{Alipay, CmbDebitCard, Wechat};
use crate::ir::{RawRow, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Provider {
    Alipay,
    Wechat,
    Cmb,
}

impl Provider {
    /// Section name in the account configuration.
    pub fn name(self) -> &'static str {
        match self {
            Provider::Alipay => "alipay",
            Provider::Wechat => "wechat",
            Provider::Cmb => "cmb",
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            Provider::Alipay => "alipay.bean",
            Provider::Wechat => "wechat.bean",
            Provider::Cmb => "bank_cmb.bean",
        }
    }

    pub fn convert(
        self,
        rows: Vec<RawRow>,
        account_map: &AccountMap,
    ) -> Result<Vec<Transaction>, ImportError> {
        match self {
            Provider::Alipay => convert::<Alipay>(rows, account_map),
            Provider::Wechat => convert::<Wechat>(rows, account_map),
            Provider::Cmb => convert::<CmbDebitCard>(rows, account_map),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
