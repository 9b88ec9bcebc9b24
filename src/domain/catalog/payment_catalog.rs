//! Reference data used by the checkout flows: crypto assets, Ozow banks and
//! the manual EFT destination account.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Supported crypto assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoAssetId {
    Xrp,
    Xlm,
    Hbar,
    Sol,
    Vet,
}

impl fmt::Display for CryptoAssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crypto_asset(*self).symbol)
    }
}

impl FromStr for CryptoAssetId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        CRYPTO_ASSETS
            .iter()
            .find(|a| a.symbol == upper)
            .map(|a| a.id)
            .ok_or_else(|| {
                ValidationError::invalid_format("crypto_asset", format!("unknown asset '{}'", s))
            })
    }
}

/// A crypto asset accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CryptoAsset {
    pub id: CryptoAssetId,
    pub name: &'static str,
    pub symbol: &'static str,
    /// Simulated units per 1 USD.
    pub rate: f64,
    pub deposit_address: &'static str,
}

impl CryptoAsset {
    /// Amount of this asset due for a USD price, rounded to 2 decimals.
    pub fn quote(&self, price_usd: u32) -> f64 {
        (f64::from(price_usd) * self.rate * 100.0).round() / 100.0
    }
}

static CRYPTO_ASSETS: [CryptoAsset; 5] = [
    CryptoAsset {
        id: CryptoAssetId::Xrp,
        name: "Ripple",
        symbol: "XRP",
        rate: 1.62,
        deposit_address: "rPVMhWB77699999XRP_ADDRESS_NODE",
    },
    CryptoAsset {
        id: CryptoAssetId::Xlm,
        name: "Stellar",
        symbol: "XLM",
        rate: 3.45,
        deposit_address: "GB777999XLM_STELAR_NODE",
    },
    CryptoAsset {
        id: CryptoAssetId::Hbar,
        name: "Hedera",
        symbol: "HBAR",
        rate: 8.12,
        deposit_address: "0.0.777999_HBAR_NODE",
    },
    CryptoAsset {
        id: CryptoAssetId::Sol,
        name: "Solana",
        symbol: "SOL",
        rate: 0.0054,
        deposit_address: "Sol777999SOL_WALLET_NODE",
    },
    CryptoAsset {
        id: CryptoAssetId::Vet,
        name: "VeChain",
        symbol: "VET",
        rate: 22.45,
        deposit_address: "0x777999VET_WALLET_NODE",
    },
];

/// Every accepted crypto asset; the first is the default selection.
pub fn all_crypto_assets() -> &'static [CryptoAsset] {
    &CRYPTO_ASSETS
}

/// Looks up a crypto asset.
pub fn crypto_asset(id: CryptoAssetId) -> &'static CryptoAsset {
    match id {
        CryptoAssetId::Xrp => &CRYPTO_ASSETS[0],
        CryptoAssetId::Xlm => &CRYPTO_ASSETS[1],
        CryptoAssetId::Hbar => &CRYPTO_ASSETS[2],
        CryptoAssetId::Sol => &CRYPTO_ASSETS[3],
        CryptoAssetId::Vet => &CRYPTO_ASSETS[4],
    }
}

static OZOW_BANKS: [&str; 6] = ["FNB", "ABSA", "Nedbank", "Standard Bank", "Capitec", "TymeBank"];

/// Banks offered on the Ozow screen. Display only.
pub fn ozow_banks() -> &'static [&'static str] {
    &OZOW_BANKS
}

/// Static destination for manual EFT payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EftBankDetails {
    pub bank_name: &'static str,
    pub account_number: &'static str,
}

/// Bank account shown with manual EFT instructions.
pub fn eft_bank_details() -> EftBankDetails {
    EftBankDetails {
        bank_name: "Local Network Bank",
        account_number: "627 999 777 00",
    }
}
