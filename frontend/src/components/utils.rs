use super::super::{Model, WizardSession};
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use shared::image::is_accepted_mime_type;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{FileList, HtmlAnchorElement, HtmlInputElement};
use yew::prelude::*;

pub const FILE_INPUT_ID: &str = "file-input";

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// First entry of `file_list` in a format the server accepts.
pub fn first_image_file(file_list: &FileList) -> Option<GlooFile> {
    (0..file_list.length())
        .filter_map(|i| file_list.item(i))
        .find(|file| is_accepted_mime_type(&file.type_()))
        .map(GlooFile::from)
}

pub fn render_error_message(model: &Model, session: &WizardSession) -> Html {
    let (message, informational) = match (session.error(), &model.input_notice) {
        (Some(err), _) => (err.to_string(), err.is_informational()),
        (None, Some(notice)) => (notice.clone(), false),
        (None, None) => return html! {},
    };

    let icon = if informational {
        "fa-solid fa-circle-info"
    } else {
        "fa-solid fa-circle-exclamation"
    };

    html! {
        <div class={classes!("error-message", informational.then_some("info-message"))}>
            <i class={icon}></i>
            <p>{ message }</p>
        </div>
    }
}

/// Saves `resource` under `filename` through a temporary anchor element.
pub fn download_resource(resource: &ObjectUrl, filename: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or("no document available")?;
    let body = document.body().ok_or("document has no body")?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "created element is not an anchor")?;
    anchor.set_href(resource);
    anchor.set_download(filename);

    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    body.remove_child(&anchor).map_err(|e| format!("{:?}", e))?;
    Ok(())
}

fn file_input() -> Option<HtmlInputElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(FILE_INPUT_ID)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

pub fn trigger_file_input() {
    if let Some(input) = file_input() {
        input.click();
    }
}

/// Lets the same file be picked again after a reset.
pub fn clear_file_input() {
    if let Some(input) = file_input() {
        input.set_value("");
    }
}
