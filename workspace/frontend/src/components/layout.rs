use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: String,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    html! {
        <div class="flex flex-col min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm sticky top-0">
                <div class="flex-1 px-4">
                    <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
                </div>
            </div>
            <main class="flex-1 p-6 max-w-4xl w-full mx-auto">
                { for props.children.iter() }
            </main>
        </div>
    }
}
