use futures::future::LocalBoxFuture;
use leptos::*;
use leptos_meta::*;
use sbt::{
    AppState, CoinGecko, CoinMarketCap, PageConfig, PreviewForm, PriceFeed, PriceRefresher,
    WalletPayment,
};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;

mod api;
mod platform;
mod presenter;
mod wallet;

use api::GlooFetch;
use platform::{TimerSleep, WebClipboard};
use presenter::SignalPresenter;
use wallet::InjectedWallet;

type Feed = PriceFeed<CoinMarketCap<GlooFetch>, CoinGecko<GlooFetch>>;
type Form = PreviewForm<SignalPresenter, WebClipboard, TimerSleep>;
type Payment = WalletPayment<InjectedWallet, SignalPresenter, TimerSleep>;

const COPY_LABEL: &str = "Copy";

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = Rc::new(api::page_config());
    let state = AppState::new();
    let presenter = SignalPresenter::new();

    let feed: Feed = PriceFeed::new(
        CoinMarketCap::new(
            GlooFetch,
            &config.coinmarketcap_url,
            &config.coinmarketcap_api_key,
        ),
        CoinGecko::new(GlooFetch, &config.coingecko_url),
        state.rate.clone(),
        config.fallback_rate,
    );
    let form: Form = PreviewForm::new(
        presenter,
        WebClipboard,
        TimerSleep,
        state.rate.clone(),
        Rc::clone(&config),
    );
    start_price_feed(feed, form.clone(), config.refresh_interval);

    // No injected provider: the payment control never appears.
    let provider = InjectedWallet::detect();
    let payment: Option<Payment> = provider.map(|provider| {
        WalletPayment::new(
            provider,
            presenter,
            TimerSleep,
            state.account.clone(),
            Rc::clone(&config),
        )
    });
    if let (Some(provider), Some(payment)) = (provider, payment.clone()) {
        start_wallet(provider, payment);
    }

    view! {
        <Html lang="en" />
        <Meta charset="utf-8" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />
        <Title text="Farcaster SBT Generator" />

        <main class="container">
            <header class="header">
                <h1>"Farcaster SBT Generator"</h1>
                <p class="subtitle">"Request a Soulbound Token for your Farcaster ID"</p>
            </header>
            <RequestForm form=form.clone() />
            <ErrorBanner presenter=presenter />
            <PreviewPanel presenter=presenter form=form config=config payment=payment />
        </main>
    }
}

/// Fetch the first rate now, then keep it fresh. Every acquisition
/// re-renders the amount of a submitted preview.
fn start_price_feed(feed: Feed, form: Form, period: Duration) {
    let initial = feed.clone();
    let initial_form = form.clone();
    spawn_local(async move {
        initial.acquire_rate().await;
        initial_form.refresh_amount();
    });

    let spawn = move |fut: LocalBoxFuture<'static, ()>| {
        let form = form.clone();
        spawn_local(async move {
            fut.await;
            form.refresh_amount();
        })
    };
    let refresher = PriceRefresher::new(feed, TimerSleep, period, spawn);
    spawn_local(refresher.run());
}

/// Pick up an existing connection and follow account switches.
fn start_wallet(provider: InjectedWallet, payment: Payment) {
    let listener = payment.clone();
    if let Err(e) = provider.on_accounts_changed(move |accounts| {
        listener.on_accounts_changed(&accounts);
    }) {
        log::warn!("Account change subscription failed: {}", e);
    }

    spawn_local(async move {
        payment.check_connection().await;
        if payment.account().is_none() {
            payment.render_control();
        }
    });
}

/// Identifier form with live preview
#[component]
fn RequestForm(form: Form) -> impl IntoView {
    let input_ref = create_node_ref::<html::Input>();

    let submit_form = form.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let text = input_ref
            .get_untracked()
            .map(|input| input.value())
            .unwrap_or_default();
        submit_form.on_submit(&text);
    };

    let on_input = move |ev: ev::Event| {
        form.live_update(&event_target_value(&ev));
    };

    view! {
        <form id="sbtForm" class="sbt-form" on:submit=on_submit>
            <label for="fid">"Farcaster ID"</label>
            <input
                id="fid"
                class="input"
                type="number"
                min="1"
                placeholder="Enter your Farcaster ID"
                node_ref=input_ref
                on:input=on_input
            />
            <button type="submit" class="btn btn-primary">"Generate SBT"</button>
        </form>
    }
}

#[component]
fn ErrorBanner(presenter: SignalPresenter) -> impl IntoView {
    view! {
        <div id="error" class="error" class:hidden=move || presenter.error.with(Option::is_none)>
            {move || presenter.error.get().unwrap_or_default()}
        </div>
    }
}

/// Preview with amount, recipient, copy button, and payment control
#[component]
fn PreviewPanel(
    presenter: SignalPresenter,
    form: Form,
    config: Rc<PageConfig>,
    payment: Option<Payment>,
) -> impl IntoView {
    let recipient = config.recipient.clone();
    let preview_ref = presenter.preview_ref;

    let copy_address = move |_| {
        let form = form.clone();
        spawn_local(async move {
            form.copy_recipient_address().await;
        });
    };

    view! {
        <div
            id="preview"
            class="preview"
            class:hidden=move || !presenter.preview_visible.get()
            node_ref=preview_ref
        >
            <h2>"SBT Preview"</h2>
            <p>"Farcaster ID: " <span id="previewFid">{move || presenter.fid.get()}</span></p>

            <Show when=move || presenter.warning.with(Option::is_some) fallback=|| ()>
                <p class="warning-text">{move || presenter.warning.get().unwrap_or_default()}</p>
            </Show>

            <div class="payment-section">
                <div class="payment-details">
                    <p>
                        "Amount: "
                        <span id="ethAmount">{move || presenter.amount.get()}</span>
                        " ETH"
                    </p>
                    <p>"Send to: " <code class="address">{recipient}</code></p>
                    <button
                        id="copyAddress"
                        class="copy-btn"
                        class:copied=move || presenter.copy_label.with(Option::is_some)
                        on:click=copy_address
                    >
                        {move || presenter.copy_label.get().unwrap_or_else(|| COPY_LABEL.to_string())}
                    </button>

                    {payment.map(|payment| view! { <PayControl presenter=presenter payment=payment /> })}

                    {move || presenter.tx_link.get().map(|url| view! {
                        <a class="tx-link" href=url target="_blank" rel="noopener noreferrer">
                            "View on Etherscan"
                        </a>
                    })}
                </div>

                <For
                    each=move || presenter.notices.get()
                    key=|(id, _)| id.0
                    children=|(_, message)| view! { <div class="success-notice">{message}</div> }
                />
            </div>
        </div>
    }
}

/// The single connect/pay button
#[component]
fn PayControl(presenter: SignalPresenter, payment: Payment) -> impl IntoView {
    move || {
        let control = presenter.control.get()?;
        let payment = payment.clone();
        let pay = move |_| {
            let payment = payment.clone();
            spawn_local(async move {
                payment.pay().await;
            });
        };
        Some(view! {
            <button
                class="web3-btn"
                class:connected=control.is_connected()
                on:click=pay
            >
                {control.label()}
            </button>
        })
    }
}

/// Initialize the app
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(|| view! { <App /> });
}
