//! The request form: identifier validation, amount preview, copy button.

use crate::identifier::{is_positive_number, FarcasterId};
use crate::platform::{Clipboard, Sleep};
use crate::presenter::Presenter;
use crate::rate::{ExchangeRate, PaymentAmount, RateCell};
use crate::PageConfig;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const INVALID_ID_MESSAGE: &str = "Please enter a valid Farcaster ID";
pub const ESTIMATED_WARNING: &str = "Unable to fetch current ETH price. Using estimated amount.";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy address";
pub const COPIED_LABEL: &str = "Copied!";

/// Form controller. Reads the rate, never writes it.
///
/// Clones share the submitted identifier and the copy-flash generation.
pub struct PreviewForm<P, C, S> {
    presenter: P,
    clipboard: C,
    sleeper: S,
    rate: RateCell,
    config: Rc<PageConfig>,
    submitted: Rc<RefCell<Option<FarcasterId>>>,
    flash: Rc<Cell<u64>>,
}

impl<P: Clone, C: Clone, S: Clone> Clone for PreviewForm<P, C, S> {
    fn clone(&self) -> Self {
        Self {
            presenter: self.presenter.clone(),
            clipboard: self.clipboard.clone(),
            sleeper: self.sleeper.clone(),
            rate: self.rate.clone(),
            config: Rc::clone(&self.config),
            submitted: Rc::clone(&self.submitted),
            flash: Rc::clone(&self.flash),
        }
    }
}

impl<P: Presenter, C: Clipboard, S: Sleep> PreviewForm<P, C, S> {
    pub fn new(
        presenter: P,
        clipboard: C,
        sleeper: S,
        rate: RateCell,
        config: Rc<PageConfig>,
    ) -> Self {
        Self {
            presenter,
            clipboard,
            sleeper,
            rate,
            config,
            submitted: Rc::default(),
            flash: Rc::default(),
        }
    }

    /// Handle a form submission. Returns the accepted identifier, or `None`
    /// after rendering a validation error.
    pub fn on_submit(&self, text: &str) -> Option<FarcasterId> {
        match text.parse::<FarcasterId>() {
            Ok(fid) => {
                self.render_preview(&fid, self.rate.get());
                *self.submitted.borrow_mut() = Some(fid.clone());
                Some(fid)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected identifier");
                self.submitted.borrow_mut().take();
                self.presenter.show_error(INVALID_ID_MESSAGE);
                None
            }
        }
    }

    /// Show the preview for `fid`. Without a rate the amount is a placeholder
    /// and a warning is shown instead of blocking.
    pub fn render_preview(&self, fid: &FarcasterId, rate: Option<ExchangeRate>) -> PaymentAmount {
        let fid = fid.as_str();
        match rate {
            Some(rate) => {
                let amount = rate.payment_amount();
                self.presenter.show_preview(fid, amount.as_str());
                amount
            }
            None => {
                let amount = PaymentAmount::estimated();
                self.presenter.show_preview(fid, amount.as_str());
                self.presenter.show_warning(ESTIMATED_WARNING);
                amount
            }
        }
    }

    /// Recompute the amount for the last submitted identifier after the rate
    /// changed. Does nothing before a submission or while no rate is known.
    pub fn refresh_amount(&self) -> Option<PaymentAmount> {
        let submitted = self.submitted.borrow();
        let fid = submitted.as_ref()?;
        let amount = self.rate.get()?.payment_amount();
        self.presenter.update_preview_fields(fid.as_str(), amount.as_str());
        self.presenter.clear_warning();
        tracing::debug!(fid = %fid, amount = %amount, "Preview amount refreshed");
        Some(amount)
    }

    /// Keystroke preview. Updates the display fields only when the text is a
    /// positive number and a rate is known.
    pub fn live_update(&self, text: &str) -> Option<PaymentAmount> {
        let trimmed = text.trim();
        if !is_positive_number(trimmed) {
            return None;
        }
        let amount = self.rate.get()?.payment_amount();
        self.presenter.update_preview_fields(trimmed, amount.as_str());
        Some(amount)
    }

    /// Copy the recipient address, flash the button label, then restore it.
    /// Only the latest flash restores the label. Returns whether the
    /// clipboard write succeeded.
    pub async fn copy_recipient_address(&self) -> bool {
        match self.clipboard.write_text(&self.config.recipient).await {
            Ok(()) => {
                let generation = self.flash.get() + 1;
                self.flash.set(generation);
                self.presenter.set_copy_label(Some(COPIED_LABEL));
                self.sleeper.sleep(self.config.copy_flash).await;
                if self.flash.get() == generation {
                    self.presenter.set_copy_label(None);
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard write failed");
                self.presenter.show_error(COPY_FAILED_MESSAGE);
                false
            }
        }
    }
}
