use super::super::WizardSession;
use yew::prelude::*;

/// Preview of the chosen source image, or a placeholder before one is picked.
pub fn render_source_preview(session: &WizardSession) -> Html {
    match session.source() {
        Some(source) => html! {
            <img
                id="actual-image-preview"
                src={source.preview.to_string()}
                alt={source.image.name()}
            />
        },
        None => html! {
            <div class="select-preview">
                <i class="fa-regular fa-image fa-2x"></i>
                <p>{"A pré-visualização da imagem aparecerá aqui."}</p>
            </div>
        },
    }
}
