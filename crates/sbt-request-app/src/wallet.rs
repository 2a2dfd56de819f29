//! Bridge to the injected `window.ethereum` provider (MetaMask and friends).

use alloy::primitives::U256;
use sbt::transaction::parse_quantity;
use sbt::{SbtError, TransactionRequest, WalletProvider};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "ethereum"], js_name = request)]
    async fn ethereum_request(args: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["window", "ethereum"], js_name = on)]
    fn ethereum_on(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> Result<(), JsValue>;
}

/// Best-effort human message from a rejected provider promise.
fn js_error_message(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

fn accounts_from(value: &JsValue) -> Vec<String> {
    if !js_sys::Array::is_array(value) {
        return Vec::new();
    }
    js_sys::Array::from(value)
        .iter()
        .filter_map(|a| a.as_string())
        .collect()
}

async fn request(method: &str, params: Option<serde_json::Value>) -> Result<JsValue, SbtError> {
    let request = js_sys::Object::new();
    js_sys::Reflect::set(&request, &"method".into(), &method.into())
        .map_err(|e| SbtError::Provider(format!("Failed to build request: {:?}", e)))?;

    if let Some(params) = params {
        let params = js_sys::JSON::parse(&params.to_string())
            .map_err(|e| SbtError::Provider(format!("Failed to set params: {:?}", e)))?;
        js_sys::Reflect::set(&request, &"params".into(), &params)
            .map_err(|e| SbtError::Provider(format!("Failed to set params: {:?}", e)))?;
    }

    ethereum_request(&request)
        .await
        .map_err(|e| SbtError::Provider(js_error_message(&e)))
}

async fn request_string(
    method: &str,
    params: Option<serde_json::Value>,
) -> Result<String, SbtError> {
    request(method, params)
        .await?
        .as_string()
        .ok_or_else(|| SbtError::Provider(format!("Invalid {} response", method)))
}

/// Handle to `window.ethereum`. Only constructed when the object exists.
#[derive(Clone, Copy, Debug)]
pub struct InjectedWallet(());

impl InjectedWallet {
    /// Returns `None` when no wallet extension injected a provider.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &"ethereum".into()).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self(()))
    }

    /// Subscribe to `accountsChanged` for the life of the page.
    pub fn on_accounts_changed(
        &self,
        mut handler: impl FnMut(Vec<String>) + 'static,
    ) -> Result<(), SbtError> {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |accounts: JsValue| {
            handler(accounts_from(&accounts));
        });
        ethereum_on("accountsChanged", &closure).map_err(|e| {
            SbtError::Provider(format!("Failed to subscribe: {}", js_error_message(&e)))
        })?;
        // The provider keeps calling it until the page goes away.
        closure.forget();
        Ok(())
    }
}

impl WalletProvider for InjectedWallet {
    async fn accounts(&self) -> Result<Vec<String>, SbtError> {
        Ok(accounts_from(&request("eth_accounts", None).await?))
    }

    async fn request_accounts(&self) -> Result<Vec<String>, SbtError> {
        Ok(accounts_from(&request("eth_requestAccounts", None).await?))
    }

    async fn gas_price(&self) -> Result<U256, SbtError> {
        parse_quantity(&request_string("eth_gasPrice", None).await?)
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, SbtError> {
        let params = serde_json::json!([tx.to_rpc()]);
        let gas = parse_quantity(&request_string("eth_estimateGas", Some(params)).await?)?;
        u64::try_from(gas)
            .map_err(|_| SbtError::Provider(format!("Gas estimate too large: {}", gas)))
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<String, SbtError> {
        let params = serde_json::json!([tx.to_rpc()]);
        request_string("eth_sendTransaction", Some(params)).await
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn set_ethereum(value: &JsValue) {
        let window = web_sys::window().unwrap();
        js_sys::Reflect::set(&window, &"ethereum".into(), value).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_detect_follows_injected_object() {
        set_ethereum(&JsValue::UNDEFINED);
        assert!(InjectedWallet::detect().is_none());

        set_ethereum(&JsValue::NULL);
        assert!(InjectedWallet::detect().is_none());

        set_ethereum(&js_sys::Object::new());
        assert!(InjectedWallet::detect().is_some());

        set_ethereum(&JsValue::UNDEFINED);
        assert!(InjectedWallet::detect().is_none());
    }

    #[wasm_bindgen_test]
    fn test_accounts_from_skips_non_strings() {
        let list = js_sys::Array::new();
        list.push(&"0xabc".into());
        list.push(&JsValue::from_f64(7.0));
        assert_eq!(accounts_from(&list), vec!["0xabc".to_string()]);
        assert!(accounts_from(&JsValue::UNDEFINED).is_empty());
    }
}
