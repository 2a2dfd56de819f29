//! In-memory port implementations for unit tests.

use crate::platform::{Clipboard, Sleep};
use crate::presenter::{NoticeId, PaymentControl, Presenter};
use crate::quote::{HttpFetch, HttpResponse};
use crate::transaction::TransactionRequest;
use crate::wallet::WalletProvider;
use crate::SbtError;
use alloy::primitives::U256;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// --- Presenter ---

#[derive(Debug, Clone, Default)]
pub struct PresenterView {
    pub fid: Option<String>,
    pub amount: Option<String>,
    pub preview_visible: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub copy_labels: Vec<Option<String>>,
    pub controls: Vec<PaymentControl>,
    pub max_controls: usize,
    pub control_renders: usize,
    pub notices: Vec<(NoticeId, String)>,
    pub dismissed_notices: Vec<String>,
    pub tx_links: Vec<String>,
    next_notice: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter(Rc<RefCell<PresenterView>>);

impl RecordingPresenter {
    pub fn view(&self) -> PresenterView {
        self.0.borrow().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn show_preview(&self, fid: &str, amount: &str) {
        let mut v = self.0.borrow_mut();
        v.fid = Some(fid.to_string());
        v.amount = Some(amount.to_string());
        v.preview_visible = true;
        v.error = None;
        v.warning = None;
    }

    fn update_preview_fields(&self, fid: &str, amount: &str) {
        let mut v = self.0.borrow_mut();
        v.fid = Some(fid.to_string());
        v.amount = Some(amount.to_string());
    }

    fn show_warning(&self, message: &str) {
        self.0.borrow_mut().warning = Some(message.to_string());
    }

    fn clear_warning(&self) {
        self.0.borrow_mut().warning = None;
    }

    fn show_error(&self, message: &str) {
        let mut v = self.0.borrow_mut();
        v.error = Some(message.to_string());
        v.preview_visible = false;
    }

    fn show_payment_error(&self, message: &str) {
        self.0.borrow_mut().error = Some(message.to_string());
    }

    fn displayed_amount(&self) -> Option<String> {
        self.0.borrow().amount.clone()
    }

    fn set_copy_label(&self, label: Option<&str>) {
        self.0.borrow_mut().copy_labels.push(label.map(str::to_string));
    }

    fn show_payment_control(&self, control: PaymentControl) {
        let mut v = self.0.borrow_mut();
        v.controls.clear();
        v.controls.push(control);
        v.max_controls = v.max_controls.max(v.controls.len());
        v.control_renders += 1;
    }

    fn show_success(&self, message: &str) -> NoticeId {
        let mut v = self.0.borrow_mut();
        v.next_notice += 1;
        let id = NoticeId(v.next_notice);
        v.notices.push((id, message.to_string()));
        id
    }

    fn dismiss_success(&self, id: NoticeId) {
        let mut v = self.0.borrow_mut();
        if let Some(pos) = v.notices.iter().position(|(n, _)| *n == id) {
            let (_, message) = v.notices.remove(pos);
            v.dismissed_notices.push(message);
        }
    }

    fn show_tx_link(&self, url: &str) {
        let mut v = self.0.borrow_mut();
        v.tx_links.clear();
        v.tx_links.push(url.to_string());
    }
}

// --- HTTP ---

#[derive(Debug, Default)]
struct FetchScript {
    responses: Vec<(String, HttpResponse)>,
    calls: Vec<(String, Vec<(String, String)>)>,
}

/// Answers by URL substring; unmatched URLs fail like a refused connection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFetch(Rc<RefCell<FetchScript>>);

impl ScriptedFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url_part: &str, status: u16, body: &str) -> Self {
        self.set_response(url_part, status, body);
        self
    }

    pub fn set_response(&self, url_part: &str, status: u16, body: &str) {
        let mut script = self.0.borrow_mut();
        script.responses.retain(|(part, _)| part != url_part);
        script.responses.push((
            url_part.to_string(),
            HttpResponse {
                status,
                body: body.to_string(),
            },
        ));
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.0.borrow().calls.clone()
    }
}

impl HttpFetch for ScriptedFetch {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, SbtError> {
        let mut script = self.0.borrow_mut();
        script.calls.push((
            url.to_string(),
            headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        script
            .responses
            .iter()
            .find(|(part, _)| url.contains(part.as_str()))
            .map(|(_, resp)| resp.clone())
            .ok_or_else(|| SbtError::Http(format!("connection refused: {url}")))
    }
}

// --- Clipboard / Sleep ---

#[derive(Debug, Default)]
struct ClipboardState {
    written: Vec<String>,
    denied: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeClipboard(Rc<RefCell<ClipboardState>>);

impl FakeClipboard {
    pub fn deny(&self) {
        self.0.borrow_mut().denied = true;
    }

    pub fn written(&self) -> Vec<String> {
        self.0.borrow().written.clone()
    }
}

impl Clipboard for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SbtError> {
        let mut state = self.0.borrow_mut();
        if state.denied {
            return Err(SbtError::Clipboard("permission denied".to_string()));
        }
        state.written.push(text.to_string());
        Ok(())
    }
}

/// Records requested durations and resolves immediately.
#[derive(Debug, Clone, Default)]
pub struct InstantSleep(Rc<RefCell<Vec<Duration>>>);

impl InstantSleep {
    pub fn slept(&self) -> Vec<Duration> {
        self.0.borrow().clone()
    }
}

impl Sleep for InstantSleep {
    async fn sleep(&self, duration: Duration) {
        self.0.borrow_mut().push(duration);
    }
}

/// Records requested durations and yields once, so concurrent flows
/// interleave at every sleep.
#[derive(Debug, Clone, Default)]
pub struct YieldSleep(Rc<RefCell<Vec<Duration>>>);

impl YieldSleep {
    pub fn slept(&self) -> Vec<Duration> {
        self.0.borrow().clone()
    }
}

impl Sleep for YieldSleep {
    async fn sleep(&self, duration: Duration) {
        self.0.borrow_mut().push(duration);
        tokio::task::yield_now().await;
    }
}

// --- Wallet ---

#[derive(Debug)]
struct WalletScript {
    authorized: Vec<String>,
    grant: Option<Vec<String>>,
    gas_price: U256,
    estimate: Result<u64, String>,
    send: Result<String, String>,
    prompts: usize,
    sent: Vec<TransactionRequest>,
}

impl Default for WalletScript {
    fn default() -> Self {
        Self {
            authorized: Vec::new(),
            grant: None,
            gas_price: U256::from(1_000_000_000u64),
            estimate: Ok(21_000),
            send: Ok(format!("0x{}", "ab".repeat(32))),
            prompts: 0,
            sent: Vec::new(),
        }
    }
}

/// Scripted provider. Denies connection prompts unless `grant` is called.
#[derive(Debug, Clone, Default)]
pub struct ScriptedWallet(Rc<RefCell<WalletScript>>);

impl ScriptedWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorized(self, accounts: &[&str]) -> Self {
        self.0.borrow_mut().authorized = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn grant(self, accounts: &[&str]) -> Self {
        self.0.borrow_mut().grant = Some(accounts.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn deny_connection(self) -> Self {
        self.0.borrow_mut().grant = None;
        self
    }

    pub fn with_estimate(self, estimate: Result<u64, String>) -> Self {
        self.0.borrow_mut().estimate = estimate;
        self
    }

    pub fn with_tx_hash(self, hash: &str) -> Self {
        self.0.borrow_mut().send = Ok(hash.to_string());
        self
    }

    pub fn reject_send(self, message: &str) -> Self {
        self.0.borrow_mut().send = Err(message.to_string());
        self
    }

    pub fn prompts(&self) -> usize {
        self.0.borrow().prompts
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.0.borrow().sent.clone()
    }
}

impl WalletProvider for ScriptedWallet {
    async fn accounts(&self) -> Result<Vec<String>, SbtError> {
        Ok(self.0.borrow().authorized.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<String>, SbtError> {
        let mut script = self.0.borrow_mut();
        script.prompts += 1;
        script
            .grant
            .clone()
            .ok_or_else(|| SbtError::Provider("User rejected the request.".to_string()))
    }

    async fn gas_price(&self) -> Result<U256, SbtError> {
        Ok(self.0.borrow().gas_price)
    }

    async fn estimate_gas(&self, _tx: &TransactionRequest) -> Result<u64, SbtError> {
        self.0.borrow().estimate.clone().map_err(SbtError::Provider)
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, SbtError> {
        let mut script = self.0.borrow_mut();
        script.sent.push(tx.clone());
        script.send.clone().map_err(SbtError::Provider)
    }
}
