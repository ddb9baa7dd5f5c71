use super::super::{Model, Msg};
use super::utils::{clear_file_input, download_resource, first_image_file};
use gloo_file::{File as GlooFile, ObjectUrl};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub const NOT_AN_IMAGE: &str = "Por favor, selecione um arquivo de imagem válido.";

pub fn handle_image_selected(model: &mut Model, file: GlooFile) -> bool {
    log::info!("Image selected: {} ({} bytes)", file.name(), file.size());
    model.input_notice = None;

    let preview = ObjectUrl::from(file.clone());
    model.controller.select_image(file, preview);
    true
}

pub fn handle_analyze(model: &mut Model) -> bool {
    if model.controller.session().is_analyzing() {
        return false;
    }
    model.input_notice = None;

    let controller = Rc::clone(&model.controller);
    spawn_local(async move {
        controller.analyze().await;
    });
    false
}

pub fn handle_select_object(model: &mut Model, label: String) -> bool {
    if model.controller.session().is_segmenting() {
        log::debug!("Ignoring '{}' while a segmentation is running", label);
        return false;
    }

    let controller = Rc::clone(&model.controller);
    spawn_local(async move {
        controller.select_object(label).await;
    });
    false
}

pub fn handle_save_result(model: &mut Model) -> bool {
    let saved = model.controller.save_result(|filename, result| {
        if let Err(err) = download_resource(&result.resource, filename) {
            log::error!("Failed to save '{}': {}", filename, err);
        }
    });
    if !saved {
        log::warn!("Save requested without a segmented result");
    }
    false
}

pub fn handle_reset(model: &mut Model) -> bool {
    model.input_notice = None;
    model.is_dragging = false;
    model.controller.reset();
    clear_file_input();
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    let file = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|file_list| first_image_file(&file_list));

    match file {
        Some(file) => ctx.link().send_message(Msg::ImageSelected(file)),
        None => ctx.link().send_message(Msg::RejectInput(NOT_AN_IMAGE.into())),
    }
    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    let Some(file_list) = event
        .clipboard_data()
        .and_then(|data_transfer| data_transfer.files())
    else {
        return false;
    };

    // Plain-text pastes carry no files and are left alone.
    if file_list.length() == 0 {
        return false;
    }

    event.prevent_default();
    match first_image_file(&file_list) {
        Some(file) => ctx.link().send_message(Msg::ImageSelected(file)),
        None => ctx.link().send_message(Msg::RejectInput(NOT_AN_IMAGE.into())),
    }
    false
}
