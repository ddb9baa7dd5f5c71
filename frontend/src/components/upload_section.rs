use super::super::{Model, Msg, WizardSession};
use super::handlers::NOT_AN_IMAGE;
use super::preview_area::render_source_preview;
use super::utils::{debounce, first_image_file, trigger_file_input, FILE_INPUT_ID};
use shared::image::ACCEPTED_MIME_TYPES;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, session: &WizardSession, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_file_input_area(model, ctx) }
            <div id="preview-container">
                { render_source_preview(session) }
            </div>
            { render_analyze_button(session, ctx) }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input.files()?;
        if files.length() == 0 {
            return None;
        }

        match first_image_file(&files) {
            Some(file) => Some(Msg::ImageSelected(file)),
            None => {
                input.set_value("");
                Some(Msg::RejectInput(NOT_AN_IMAGE.into()))
            }
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <>
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept={ACCEPTED_MIME_TYPES.join(", ")}
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, trigger_file_input)}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Arraste uma imagem, cole ou clique para escolher"}</p>
                    <p class="file-types">{"Formatos suportados: PNG, JPG, WEBP"}</p>
                </div>
            </div>

            <button
                id="upload-button"
                class="analyze-btn secondary-btn"
                onclick={debounce(300, trigger_file_input)}
            >
                <i class="fa-solid fa-upload"></i> {" Selecionar Imagem"}
            </button>
        </>
    }
}

fn render_analyze_button(session: &WizardSession, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();
    let analyzing = session.is_analyzing();

    html! {
        <div class="button-container">
            <button
                class="analyze-btn"
                disabled={analyzing || session.source().is_none()}
                onclick={debounce(300, move || link.send_message(Msg::Analyze))}
            >
                {
                    if analyzing {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analisando..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analisar Imagem"}</> }
                    }
                }
            </button>
        </div>
    }
}
