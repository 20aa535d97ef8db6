//! Browser Bindings
//!
//! `fetch` transport through gloo-net and the two Web Storage areas.
//! Compiles everywhere; only the browser provides the underlying APIs.

use std::sync::Arc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

use crate::error::SessionError;
use crate::session::{KeyValueStore, Session};
use crate::transport::{
    HttpRequest, HttpResponse, Method, MultipartForm, RequestBody, Transport, TransportError,
};

// ========================
// Fetch transport
// ========================

/// Aborts the underlying fetch when the request future is dropped
struct AbortOnDrop(AbortController);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

fn request_builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Patch => Request::patch(url),
        Method::Delete => Request::delete(url),
    }
}

fn form_data(form: &MultipartForm) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(|e| TransportError::Build(js_error(e)))?;
    for (name, value) in &form.fields {
        data.append_with_str(name, value)
            .map_err(|e| TransportError::Build(js_error(e)))?;
    }
    if let Some(file) = &form.file {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.content_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| TransportError::Build(js_error(e)))?;
        data.append_with_blob_and_filename(&form.file_field, &blob, &file.file_name)
            .map_err(|e| TransportError::Build(js_error(e)))?;
    }
    Ok(data)
}

/// `window.fetch` via gloo-net
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let controller = AbortController::new().map_err(|e| TransportError::Build(js_error(e)))?;
        let signal = controller.signal();
        let _guard = AbortOnDrop(controller);

        let mut builder = request_builder(request.method, &request.url).abort_signal(Some(&signal));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.body {
            None => builder.build(),
            Some(RequestBody::Json(value)) => builder.body(value.to_string()),
            Some(RequestBody::Multipart(form)) => builder.body(form_data(&form)?),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let response = built
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(HttpResponse::from_text(status, &text))
    }
}

// ========================
// Web Storage
// ========================

/// `localStorage` or `sessionStorage`, looked up on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    Local,
    Session,
}

impl BrowserStorage {
    fn area(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self {
            BrowserStorage::Local => window.local_storage().ok().flatten(),
            BrowserStorage::Session => window.session_storage().ok().flatten(),
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.area()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.area()
            .ok_or(SessionError::Unavailable)?
            .set_item(key, value)
            .map_err(|e| SessionError::WriteRefused(js_error(e)))
    }

    fn remove(&self, key: &str) {
        if let Some(area) = self.area() {
            let _ = area.remove_item(key);
        }
    }
}

/// Session backed by `localStorage` + `sessionStorage`
pub fn browser_session() -> Session {
    Session::new(Arc::new(BrowserStorage::Local), Arc::new(BrowserStorage::Session))
}
