//! Combo Request Handlers
//!
//! The four `combos:*` handlers. Each one reports failures in its response
//! instead of returning an error.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{Combo, ComboInput, ComboUpdate};
use super::stock::available_stock;
use super::store::ComboStore;

pub const CHANNEL_GET_ALL: &str = "combos:getAll";
pub const CHANNEL_CREATE: &str = "combos:create";
pub const CHANNEL_UPDATE: &str = "combos:update";
pub const CHANNEL_DELETE: &str = "combos:delete";

const NOT_INITIALIZED: &str = "Database not initialized";

/// Envelope returned by every handler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> HandlerResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Log the error and turn it into a failure response
fn recover<T>(result: Result<T>, action: &str) -> Result<T, HandlerResponse<T>> {
    result.map_err(|e| {
        log::error!("Error {}: {:#}", action, e);
        HandlerResponse::failure(e.to_string())
    })
}

/// Combo handlers bound to an optional store
#[derive(Clone, Default)]
pub struct ComboHandlers {
    store: Option<Arc<dyn ComboStore>>,
}

impl ComboHandlers {
    pub fn new(store: Arc<dyn ComboStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Handlers with no store attached yet
    pub fn uninitialized() -> Self {
        Self { store: None }
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&Arc<dyn ComboStore>> {
        self.store.as_ref().ok_or_else(|| anyhow!(NOT_INITIALIZED))
    }

    /// All combos, newest first, with `stock` set to what can be assembled
    pub async fn get_all(&self) -> HandlerResponse<Vec<Combo>> {
        let Some(store) = &self.store else {
            return HandlerResponse::ok(Vec::new());
        };

        match recover(load_with_stock(&**store).await, "getting combos") {
            Ok(combos) => HandlerResponse::ok(combos),
            Err(response) => response,
        }
    }

    pub async fn create(&self, input: ComboInput) -> HandlerResponse<Combo> {
        let result = match self.store() {
            Ok(store) => store.create_combo(input).await,
            Err(e) => Err(e),
        };
        match recover(result, "creating combo") {
            Ok(combo) => HandlerResponse::ok(combo),
            Err(response) => response,
        }
    }

    /// Fields missing from `update` keep their stored values
    pub async fn update(&self, id: i64, update: ComboUpdate) -> HandlerResponse<Combo> {
        let result = match self.store() {
            Ok(store) => store.update_combo(id, update).await,
            Err(e) => Err(e),
        };
        match recover(result, "updating combo") {
            Ok(combo) => HandlerResponse::ok(combo),
            Err(response) => response,
        }
    }

    pub async fn delete(&self, id: i64) -> HandlerResponse<()> {
        let result = match self.store() {
            Ok(store) => store.delete_combo(id).await,
            Err(e) => Err(e),
        };
        match recover(result, "deleting combo") {
            Ok(()) => HandlerResponse::done(),
            Err(response) => response,
        }
    }

    /// Route a channel invocation with JSON arguments to its handler
    pub async fn dispatch(&self, channel: &str, args: &[Value]) -> Value {
        match channel {
            CHANNEL_GET_ALL => to_json(self.get_all().await),
            CHANNEL_CREATE => match recover(parse_input(args.first()), "creating combo") {
                Ok(input) => to_json(self.create(input).await),
                Err(response) => to_json(response),
            },
            CHANNEL_UPDATE => {
                let parsed = parse_id(args.first())
                    .and_then(|id| Ok((id, parse_update(args.get(1))?)));
                match recover(parsed, "updating combo") {
                    Ok((id, update)) => to_json(self.update(id, update).await),
                    Err(response) => to_json(response),
                }
            }
            CHANNEL_DELETE => match recover(parse_id(args.first()), "deleting combo") {
                Ok(id) => to_json(self.delete(id).await),
                Err(response) => to_json(response),
            },
            other => {
                log::warn!("No handler registered for '{}'", other);
                to_json(HandlerResponse::<()>::failure(format!(
                    "No handler registered for '{}'",
                    other
                )))
            }
        }
    }
}

async fn load_with_stock(store: &dyn ComboStore) -> Result<Vec<Combo>> {
    let combos = store.find_combos().await?;
    let products = store.find_products().await?;
    Ok(combos
        .into_iter()
        .map(|mut combo| {
            combo.stock = available_stock(&combo.items, &products);
            combo
        })
        .collect())
}

fn to_json<T: Serialize>(response: HandlerResponse<T>) -> Value {
    serde_json::to_value(&response).unwrap_or_else(|e| {
        serde_json::json!({ "success": false, "error": e.to_string() })
    })
}

fn parse_input(arg: Option<&Value>) -> Result<ComboInput> {
    let arg = arg.ok_or_else(|| anyhow!("Missing combo data"))?;
    ComboInput::deserialize(arg).context("Invalid combo data")
}

fn parse_update(arg: Option<&Value>) -> Result<ComboUpdate> {
    let arg = arg.ok_or_else(|| anyhow!("Missing combo data"))?;
    ComboUpdate::deserialize(arg).context("Invalid combo data")
}

/// Ids arrive as numbers or numeric strings
fn parse_id(arg: Option<&Value>) -> Result<i64> {
    match arg {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| anyhow!("Invalid combo id: {}", n)),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .with_context(|| format!("Invalid combo id: {}", s)),
        Some(other) => bail!("Invalid combo id: {}", other),
        None => bail!("Missing combo id"),
    }
}
