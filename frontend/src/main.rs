mod api;
mod components;

use api::BackendClient;
use components::handlers;
use components::header::render_header;
use components::object_selection::render_object_selection;
use components::results::render_results;
use components::stepper::render_stepper;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{Session, WizardController, WizardStep};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub type WizardSession = Session<GlooFile, ObjectUrl>;

// Yew msg components
pub enum Msg {
    // Input events
    ImageSelected(GlooFile),
    RejectInput(String),
    SetDragging(bool),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),

    // Wizard transitions
    Analyze,
    SelectObject(String),
    SaveResult,
    Reset,

    // Emitted by the controller after every state change
    SessionChanged,
}

// Main component
pub struct Model {
    pub controller: Rc<WizardController<BackendClient>>,
    pub input_notice: Option<String>,
    pub is_dragging: bool,
    _paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let controller = WizardController::new(BackendClient::for_current_origin())
            .with_listener(move || link.send_message(Msg::SessionChanged));

        let link = ctx.link().clone();
        let paste_listener = web_sys::window().map(|window| {
            EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            })
        });

        Self {
            controller: Rc::new(controller),
            input_notice: None,
            is_dragging: false,
            _paste_listener: paste_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ImageSelected(file) => handlers::handle_image_selected(self, file),
            Msg::RejectInput(notice) => {
                self.input_notice = Some(notice);
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),

            Msg::Analyze => handlers::handle_analyze(self),
            Msg::SelectObject(label) => handlers::handle_select_object(self, label),
            Msg::SaveResult => handlers::handle_save_result(self),
            Msg::Reset => handlers::handle_reset(self),

            Msg::SessionChanged => true,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = self.controller.session();
        let step = session.step();

        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_stepper(step) }
                    { render_error_message(self, &session) }
                    {
                        match step {
                            WizardStep::AwaitingUpload => render_upload_section(self, &session, ctx),
                            WizardStep::ObjectsIdentified => render_object_selection(&session, ctx),
                            WizardStep::ResultReady => render_results(&session, ctx),
                        }
                    }
                </main>

                <footer class="app-footer">
                    <p>{"Análise de Imagens com IA | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
