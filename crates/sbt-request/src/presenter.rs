//! Presentation port. Components describe what the page shows; the browser
//! shell decides how.

use std::fmt;

/// Handle for a success notice, used to dismiss it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

/// The single connect/pay control inside the payment details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentControl {
    Connect,
    Pay { account: String },
}

impl PaymentControl {
    pub fn label(&self) -> String {
        match self {
            PaymentControl::Connect => "Connect & Pay".to_string(),
            PaymentControl::Pay { account } => format!("Pay with {}", short_address(account)),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, PaymentControl::Pay { .. })
    }
}

impl fmt::Display for PaymentControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// First 6 and last 6 characters of an address.
pub fn short_address(address: &str) -> String {
    if address.len() > 12 && address.is_ascii() {
        format!("{}...{}", &address[..6], &address[address.len() - 6..])
    } else {
        address.to_string()
    }
}

/// First 10 characters of a transaction hash.
pub fn short_tx_hash(hash: &str) -> &str {
    hash.get(..10).unwrap_or(hash)
}

/// Everything the components render.
///
/// Implementations must keep at most one payment control and one explorer
/// link: each `show_*` replaces what was there.
pub trait Presenter {
    /// Write identifier and amount, reveal the preview, clear any error or
    /// warning.
    fn show_preview(&self, fid: &str, amount: &str);

    /// Write identifier and amount only.
    fn update_preview_fields(&self, fid: &str, amount: &str);

    /// Non-blocking notice shown next to the preview.
    fn show_warning(&self, message: &str);

    fn clear_warning(&self);

    /// Show an error and hide the preview.
    fn show_error(&self, message: &str);

    /// Show an error from the payment flow; the preview stays visible.
    fn show_payment_error(&self, message: &str);

    /// The amount currently displayed in the preview, if any.
    fn displayed_amount(&self) -> Option<String>;

    /// Temporary copy button label; `None` restores the default.
    fn set_copy_label(&self, label: Option<&str>);

    fn show_payment_control(&self, control: PaymentControl);

    fn show_success(&self, message: &str) -> NoticeId;

    fn dismiss_success(&self, id: NoticeId);

    fn show_tx_link(&self, url: &str);
}
