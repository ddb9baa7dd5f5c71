use shared::WizardStep;
use yew::prelude::*;

/// Progress indicator across the three wizard steps.
pub fn render_stepper(current: WizardStep) -> Html {
    html! {
        <ol class="stepper">
            { for WizardStep::all().map(|step| render_step(step, current)) }
        </ol>
    }
}

fn render_step(step: WizardStep, current: WizardStep) -> Html {
    let class = classes!(
        "step",
        (step == current).then_some("active"),
        (step < current).then_some("completed"),
    );

    html! {
        <li class={class} key={step.number().to_string()}>
            <span class="step-number">
                {
                    if step < current {
                        html! { <i class="fa-solid fa-check"></i> }
                    } else {
                        html! { <>{ step.number() }</> }
                    }
                }
            </span>
            <span class="step-title">{ step.to_string() }</span>
        </li>
    }
}
