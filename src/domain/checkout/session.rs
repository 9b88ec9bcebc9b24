//! The transient payment session for one checkout flow.

use serde::Serialize;

use super::{CardBrand, CardInput, EftReference, PaymentMethod, PaymentPhase};
use crate::domain::catalog::{all_crypto_assets, CryptoAssetId};

/// Method-specific data collected during a flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MethodPayload {
    Card { input: CardInput, brand: CardBrand },
    Crypto { asset: CryptoAssetId },
    Ozow { bank: Option<String> },
    ManualEft { reference: EftReference },
}

impl MethodPayload {
    /// Fresh payload for a newly entered flow.
    pub fn initial(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Card => MethodPayload::Card {
                input: CardInput::default(),
                brand: CardBrand::Unknown,
            },
            PaymentMethod::Crypto => MethodPayload::Crypto {
                asset: default_crypto_asset(),
            },
            PaymentMethod::Ozow => MethodPayload::Ozow { bank: None },
            PaymentMethod::ManualEft => MethodPayload::ManualEft {
                reference: EftReference::generate(),
            },
        }
    }
}

fn default_crypto_asset() -> CryptoAssetId {
    all_crypto_assets()
        .first()
        .map(|asset| asset.id)
        .unwrap_or(CryptoAssetId::Xrp)
}

/// Progress through one checkout flow.
///
/// At most one exists at a time. Starting another discards it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSession {
    method: PaymentMethod,
    phase: PaymentPhase,
    payload: MethodPayload,
}

impl PaymentSession {
    pub fn start(method: PaymentMethod) -> Self {
        Self {
            method,
            phase: PaymentPhase::Collecting,
            payload: MethodPayload::initial(method),
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn phase(&self) -> PaymentPhase {
        self.phase
    }

    pub fn payload(&self) -> &MethodPayload {
        &self.payload
    }

    pub(super) fn payload_mut(&mut self) -> &mut MethodPayload {
        &mut self.payload
    }

    pub(super) fn set_phase(&mut self, phase: PaymentPhase) {
        self.phase = phase;
    }

    /// The EFT reference, when this is a manual EFT session.
    pub fn eft_reference(&self) -> Option<&EftReference> {
        match &self.payload {
            MethodPayload::ManualEft { reference } => Some(reference),
            _ => None,
        }
    }
}
