//! Google Sign-In Button
//!
//! Renders the Google Identity Services button when a client id is
//! configured. The GIS script itself is loaded by `index.html`.

use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::context::use_app_context;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = initialize, catch)]
    fn gis_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = renderButton, catch)]
    fn gis_render_button(parent: &web_sys::HtmlElement, options: &JsValue) -> Result<(), JsValue>;
}

fn object(entries: &[(&str, &JsValue)]) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj.into())
}

/// Initialize GIS and draw its button into `parent`
fn render(parent: &web_sys::HtmlElement, client_id: &str, on_credential: Callback<Option<String>>) -> Result<(), JsValue> {
    let handler = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        let credential = js_sys::Reflect::get(&response, &JsValue::from_str("credential"))
            .ok()
            .and_then(|v| v.as_string());
        on_credential.run(credential);
    });
    let config = object(&[
        ("client_id", &JsValue::from_str(client_id)),
        ("callback", &handler.into_js_value()),
    ])?;
    gis_initialize(&config)?;
    let options = object(&[
        ("theme", &JsValue::from_str("outline")),
        ("size", &JsValue::from_str("large")),
        ("text", &JsValue::from_str("continue_with")),
    ])?;
    gis_render_button(parent, &options)
}

/// `on_credential` receives the ID token, or `None` when GIS returned none
#[component]
pub fn GoogleButton(#[prop(into)] on_credential: Callback<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let Some(client_id) = ctx.config().google_client_id else {
        return ().into_any();
    };
    let container = NodeRef::<html::Div>::new();

    Effect::new(move |_| {
        if let Some(el) = container.get() {
            if let Err(e) = render(&el, &client_id, on_credential) {
                log::warn!("[AUTH] Google sign-in unavailable: {:?}", e);
            }
        }
    });

    view! {
        <div class="google-signin">
            <div class="divider"><span>"or"</span></div>
            <div node_ref=container></div>
        </div>
    }
    .into_any()
}
