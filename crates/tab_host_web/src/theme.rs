//! Browser theme-color query backed by the extension theme API.

use tab_host::{ThemeColorFuture, ThemeColorService};

#[derive(Debug, Clone, Copy, Default)]
/// Theme color service reading `chrome.theme.getCurrent` frame colors.
pub struct WebThemeColorService;

impl ThemeColorService for WebThemeColorService {
    fn frame_color<'a>(&'a self) -> ThemeColorFuture<'a, Option<String>> {
        Box::pin(async {
            #[cfg(target_arch = "wasm32")]
            {
                current_frame_color().await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                None
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn current_frame_color() -> Option<String> {
    use std::{cell::RefCell, rc::Rc};

    use futures::channel::oneshot;
    use js_sys::Reflect;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};

    let theme_api = crate::interop::global_path(&["chrome", "theme"])?;
    let get_current: js_sys::Function = Reflect::get(&theme_api, &JsValue::from_str("getCurrent"))
        .ok()?
        .dyn_into()
        .ok()?;

    let (tx, rx) = oneshot::channel::<Option<String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));
    let callback_sender = sender.clone();
    let callback = Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |theme: JsValue| {
        if let Some(tx) = callback_sender.borrow_mut().take() {
            let _ = tx.send(parse_frame_color(&theme));
        }
    }));

    if get_current
        .call1(&theme_api, callback.as_ref().unchecked_ref())
        .is_err()
    {
        return None;
    }
    rx.await.ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn parse_frame_color(theme: &wasm_bindgen::JsValue) -> Option<String> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    // The API reports colors as [r, g, b] channel arrays.
    let colors = Reflect::get(theme, &JsValue::from_str("colors")).ok()?;
    let frame = Reflect::get(&colors, &JsValue::from_str("frame")).ok()?;
    let channels = js_sys::Array::from(&frame);
    if channels.length() < 3 {
        return None;
    }
    let r = channels.get(0).as_f64()? as u8;
    let g = channels.get(1).as_f64()? as u8;
    let b = channels.get(2).as_f64()? as u8;
    Some(format!("rgb({r}, {g}, {b})"))
}
