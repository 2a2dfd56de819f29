//! Signal-backed presenter. Components write signals; the view reads them.

use leptos::*;
use sbt::{NoticeId, PaymentControl, Presenter};

#[derive(Clone, Copy)]
pub struct SignalPresenter {
    pub fid: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub preview_visible: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub warning: RwSignal<Option<String>>,
    pub copy_label: RwSignal<Option<String>>,
    pub control: RwSignal<Option<PaymentControl>>,
    pub notices: RwSignal<Vec<(NoticeId, String)>>,
    pub tx_link: RwSignal<Option<String>>,
    pub preview_ref: NodeRef<html::Div>,
    next_notice: StoredValue<u64>,
}

impl SignalPresenter {
    /// Must be called inside a component so the signals have an owner.
    pub fn new() -> Self {
        Self {
            fid: create_rw_signal(String::new()),
            amount: create_rw_signal(String::new()),
            preview_visible: create_rw_signal(false),
            error: create_rw_signal(None),
            warning: create_rw_signal(None),
            copy_label: create_rw_signal(None),
            control: create_rw_signal(None),
            notices: create_rw_signal(Vec::new()),
            tx_link: create_rw_signal(None),
            preview_ref: create_node_ref(),
            next_notice: store_value(0),
        }
    }
}

impl Presenter for SignalPresenter {
    fn show_preview(&self, fid: &str, amount: &str) {
        self.update_preview_fields(fid, amount);
        self.error.set(None);
        self.clear_warning();
        self.preview_visible.set(true);
        if let Some(preview) = self.preview_ref.get_untracked() {
            preview.scroll_into_view();
        }
    }

    fn update_preview_fields(&self, fid: &str, amount: &str) {
        self.fid.set(fid.to_string());
        self.amount.set(amount.to_string());
    }

    fn show_warning(&self, message: &str) {
        self.warning.set(Some(message.to_string()));
    }

    fn clear_warning(&self) {
        self.warning.set(None);
    }

    fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));
        self.preview_visible.set(false);
    }

    fn show_payment_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));
    }

    fn displayed_amount(&self) -> Option<String> {
        let amount = self.amount.get_untracked();
        (!amount.is_empty()).then_some(amount)
    }

    fn set_copy_label(&self, label: Option<&str>) {
        self.copy_label.set(label.map(str::to_string));
    }

    fn show_payment_control(&self, control: PaymentControl) {
        // One slot: setting it replaces the previous control.
        self.control.set(Some(control));
    }

    fn show_success(&self, message: &str) -> NoticeId {
        self.next_notice.update_value(|n| *n += 1);
        let id = NoticeId(self.next_notice.get_value());
        self.notices
            .update(|notices| notices.push((id, message.to_string())));
        id
    }

    fn dismiss_success(&self, id: NoticeId) {
        self.notices
            .update(|notices| notices.retain(|(notice, _)| *notice != id));
    }

    fn show_tx_link(&self, url: &str) {
        self.tx_link.set(Some(url.to_string()));
    }
}
