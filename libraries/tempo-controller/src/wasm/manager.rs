//! WASM-compatible controller wrapper

use crate::{Controller, ControllerConfig, Key, RenderTarget, UiEvent};
use js_sys::Function;
use tempo_core::Playlist;
use tempo_storage::{KeyValueStore, MemoryKeyValueStore, PLAYLISTS_KEY};
use wasm_bindgen::prelude::*;

/// Browser-facing controller
///
/// Playlists live in memory; the host seeds them from `localStorage` and
/// writes back `playlistsJson()` whenever the optional persist callback
/// fires.
#[wasm_bindgen]
pub struct WasmController {
    inner: Controller<MemoryKeyValueStore>,
    on_playlists_changed: Option<Function>,
    last_playlists: Option<String>,
}

#[wasm_bindgen]
impl WasmController {
    /// Create a controller
    ///
    /// `stored_playlists` is the raw JSON previously saved under the
    /// `playlists` key, if any.
    #[wasm_bindgen(constructor)]
    pub fn new(
        media_root: Option<String>,
        initial_volume: Option<u8>,
        stored_playlists: Option<String>,
    ) -> Result<WasmController, JsValue> {
        console_error_panic_hook::set_once();

        let defaults = ControllerConfig::default();
        let config = ControllerConfig {
            media_root: media_root.unwrap_or(defaults.media_root),
            initial_volume: initial_volume.unwrap_or(defaults.initial_volume),
        };

        let store = match &stored_playlists {
            Some(json) => MemoryKeyValueStore::with_value(PLAYLISTS_KEY, json.as_str()),
            None => MemoryKeyValueStore::new(),
        };

        let inner = Controller::new(config, store).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            inner,
            on_playlists_changed: None,
            last_playlists: stored_playlists,
        })
    }

    /// Effects to run at startup
    pub fn start(&mut self) -> Result<JsValue, JsValue> {
        let effects = self.inner.start();
        to_js(&effects)
    }

    /// Apply one event and return the effects to run
    pub fn handle(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: UiEvent = serde_wasm_bindgen::from_value(event)?;
        let effects = self.inner.handle(event);
        self.notify_playlists_changed();
        to_js(&effects)
    }

    /// Keyboard shortcut by DOM key name
    #[wasm_bindgen(js_name = keyPressed)]
    pub fn key_pressed(&mut self, key: &str, in_text_input: bool) -> Result<JsValue, JsValue> {
        let effects = self.inner.handle(UiEvent::KeyPressed {
            key: Key::parse(key),
            in_text_input,
        });
        to_js(&effects)
    }

    /// View model for a render target, as returned in a `render` effect
    #[wasm_bindgen(js_name = viewModel)]
    pub fn view_model(&self, target: JsValue) -> Result<JsValue, JsValue> {
        let target: RenderTarget = serde_wasm_bindgen::from_value(target)?;
        to_js(&self.inner.view_model(target))
    }

    /// Serialized playlists, in the format `new` accepts
    #[wasm_bindgen(js_name = playlistsJson)]
    pub fn playlists_json(&self) -> Option<String> {
        self.inner
            .playlists()
            .store()
            .get(PLAYLISTS_KEY)
            .ok()
            .flatten()
    }

    /// Current playlists as JS objects
    pub fn playlists(&self) -> Result<JsValue, JsValue> {
        let playlists: &[Playlist] = self.inner.playlists().list();
        to_js(playlists)
    }

    /// Register a callback invoked with the playlists JSON after each change
    #[wasm_bindgen(js_name = onPlaylistsChanged)]
    pub fn on_playlists_changed(&mut self, callback: Function) {
        self.on_playlists_changed = Some(callback);
    }

    fn notify_playlists_changed(&mut self) {
        let current = self.playlists_json();
        if current == self.last_playlists {
            return;
        }
        if let (Some(callback), Some(json)) = (&self.on_playlists_changed, &current) {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(json));
        }
        self.last_playlists = current;
    }
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(Into::into)
}

