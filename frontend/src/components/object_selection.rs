use super::super::{Model, Msg, WizardSession};
use super::preview_area::render_source_preview;
use super::utils::debounce;
use shared::labels::label_key;
use yew::prelude::*;

pub fn render_object_selection(session: &WizardSession, ctx: &Context<Model>) -> Html {
    let segmenting = session.is_segmenting();
    let link = ctx.link().clone();

    html! {
        <div class="selection-section">
            <div id="preview-container">
                { render_source_preview(session) }
            </div>

            <div class="objects-panel">
                <h2>{"Objetos Identificados"}</h2>
                <p class="hint">{"Clique em um objeto para isolá-lo da imagem."}</p>
                <div class="object-list">
                    { for session.identified_objects().iter().enumerate().map(|(index, label)| {
                        render_object_button(index, label, session, ctx)
                    })}
                </div>
                {
                    match session.selected_label().filter(|_| segmenting) {
                        Some(label) => html! {
                            <p class="segmenting-status">
                                <i class="fa-solid fa-spinner fa-spin"></i>
                                { format!(" Isolando o objeto: {}...", label) }
                            </p>
                        },
                        None => html! {},
                    }
                }
            </div>

            <div class="button-container">
                <button
                    class="analyze-btn secondary-btn"
                    onclick={debounce(300, move || link.send_message(Msg::Reset))}
                >
                    <i class="fa-solid fa-rotate-left"></i>{" Analisar Outra Imagem"}
                </button>
            </div>
        </div>
    }
}

fn render_object_button(index: usize, label: &str, session: &WizardSession, ctx: &Context<Model>) -> Html {
    let is_selected = session.selected_label() == Some(label);
    let owned = label.to_string();

    html! {
        <button
            key={label_key(index, label)}
            class={classes!("object-btn", is_selected.then_some("selected"))}
            disabled={session.is_segmenting()}
            onclick={ctx.link().callback(move |_| Msg::SelectObject(owned.clone()))}
        >
            { label }
        </button>
    }
}
