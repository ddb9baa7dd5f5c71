use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-wand-magic-sparkles"></i> {" Segmentador de Objetos com IA"}</h1>
            <p class="subtitle">{"Carregue uma imagem, escolha um objeto e receba-o isolado do fundo"}</p>
        </header>
    }
}
