use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{}", element_id);
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_class(document: &web::Document, element_id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        _ = el.class_list().toggle_with_force(class, on);
    }
}

#[inline]
pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        if visible {
            _ = cl.remove_1("hidden");
        } else {
            _ = cl.add_1("hidden");
        }
    }
}
