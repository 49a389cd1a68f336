use common::{ResultView, Section, SectionKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub result: ResultView,
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let (overview, prediction): (Vec<&Section>, Vec<&Section>) =
        props.result.sections.iter().partition(|section| {
            matches!(
                section.kind(),
                SectionKind::LastTenDays | SectionKind::TodayTrend | SectionKind::News
            )
        });

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{props.result.heading()}</h2>
                { for overview.into_iter().map(render_section) }
                if !prediction.is_empty() {
                    <>
                        <div class="divider"></div>
                        <h2 class="card-title">{"AI Prediction"}</h2>
                        { for prediction.into_iter().map(render_section) }
                    </>
                }
            </div>
        </div>
    }
}

fn render_section(section: &Section) -> Html {
    match section {
        Section::List { kind, items } => html! {
            <div key={kind.title()}>
                <h3 class="font-semibold mt-2">{format!("{}:", kind.title())}</h3>
                <ul class="list-disc list-inside text-sm">
                    { for items.iter().map(|item| html! { <li>{item}</li> }) }
                </ul>
            </div>
        },
        Section::Label { kind, value } => html! {
            <p key={kind.title()}>
                {format!("{}: ", kind.title())}
                <strong>{value}</strong>
            </p>
        },
    }
}
