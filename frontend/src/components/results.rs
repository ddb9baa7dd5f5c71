use super::super::{Model, Msg, WizardSession};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_results(session: &WizardSession, ctx: &Context<Model>) -> Html {
    let (Some(source), Some(segmented)) = (session.source(), session.segmented()) else {
        return html! {};
    };
    let label = session.selected_label().unwrap_or_default();
    let link = ctx.link();

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2><i class="fa-solid fa-scissors"></i>{ format!(" {}", label) }</h2>
            </div>

            <div class="comparison">
                <figure>
                    <figcaption>{"Original"}</figcaption>
                    <img src={source.preview.to_string()} alt={source.image.name()} />
                </figure>
                <figure class="checkerboard">
                    <figcaption>{"Segmentado"}</figcaption>
                    <img src={segmented.resource.to_string()} alt={label.to_string()} />
                </figure>
            </div>

            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::SaveResult)
                    })}
                >
                    <i class="fa-solid fa-download"></i>{" Salvar Imagem Segmentada"}
                </button>
                <button
                    class="analyze-btn secondary-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Reset)
                    })}
                >
                    <i class="fa-solid fa-rotate-left"></i>{" Analisar Outra Imagem"}
                </button>
            </div>
        </div>
    }
}
