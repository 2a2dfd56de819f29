use crate::rate::RateCell;
use std::sync::{Arc, PoisonError, RwLock};

/// Active wallet account, lowercase hex. Written only by the payment flow.
#[derive(Debug, Clone, Default)]
pub struct AccountCell {
    inner: Arc<RwLock<Option<String>>>,
}

impl AccountCell {
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_connected(&self) -> bool {
        self.get().is_some()
    }

    pub(crate) fn set(&self, account: Option<&str>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) =
            account.map(|a| a.to_lowercase());
    }
}

/// Page session state. Each field has one writer: the price feed owns
/// `rate`, the wallet payment owns `account`. Everyone else only reads.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub rate: RateCell,
    pub account: AccountCell,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
