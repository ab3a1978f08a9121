use yew::prelude::*;

struct Feature {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

struct Metric {
    value: &'static str,
    label: &'static str,
    color: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        icon: "📊",
        title: "Smart Analytics",
        description: "Get detailed insights into your spending patterns with interactive charts and reports",
    },
    Feature {
        icon: "💰",
        title: "Budget Management",
        description: "Set budgets for different categories and track your progress in real-time",
    },
    Feature {
        icon: "💳",
        title: "Expense Tracking",
        description: "Easily log expenses with categories, photos, and recurring transaction support",
    },
    Feature {
        icon: "📈",
        title: "Visual Reports",
        description: "View your financial data through beautiful charts and exportable reports",
    },
];

const METRICS: [Metric; 3] = [
    Metric { value: "50K+", label: "Active Users", color: "text-blue-500" },
    Metric { value: "$2M+", label: "Money Saved", color: "text-green-500" },
    Metric { value: "4.8★", label: "App Rating", color: "text-purple-500" },
];

const POWERFUL_FEATURES: [Feature; 4] = [
    Feature { icon: "📱", title: "Dashboard", description: "Overview of your finances" },
    Feature { icon: "📋", title: "Expenses", description: "Track all transactions" },
    Feature { icon: "🎯", title: "Budgets", description: "Set spending limits" },
    Feature { icon: "📊", title: "Analytics", description: "Detailed insights" },
];

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub on_sign_in: Callback<()>,
    pub on_sign_up: Callback<()>,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let sign_in = props.on_sign_in.reform(|_: MouseEvent| ());
    let sign_up = props.on_sign_up.reform(|_: MouseEvent| ());

    html! {
        <div class="min-h-screen bg-background">
            <section class="max-w-5xl mx-auto px-6 pt-20 pb-12 text-center">
                <h1 class="text-4xl font-black tracking-tight text-[#173E63]">{"Take control of your spending"}</h1>
                <p class="mt-4 text-muted-foreground">
                    {"Track expenses, set budgets and see where your money goes every month."}
                </p>
                <div class="mt-8 flex justify-center gap-3">
                    <button onclick={sign_up.clone()} class="bg-[#173E63] text-white px-6 py-3 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        {"Get Started"}
                    </button>
                    <button onclick={sign_in.clone()} class="border border-[#173E63] text-[#173E63] px-6 py-3 rounded-xl font-bold text-sm hover:bg-[#eef4f9] transition-all">
                        {"Sign In"}
                    </button>
                </div>
            </section>

            <section class="max-w-5xl mx-auto px-6 grid grid-cols-1 md:grid-cols-2 gap-6">
                { for FEATURES.iter().map(|feature| html! {
                    <div class="bg-card rounded-[10px] p-6 border border-border shadow-sm">
                        <div class="text-3xl mb-3">{ feature.icon }</div>
                        <h3 class="font-bold text-foreground text-lg">{ feature.title }</h3>
                        <p class="text-sm text-muted-foreground mt-1">{ feature.description }</p>
                    </div>
                }) }
            </section>

            <section class="max-w-5xl mx-auto px-6 py-12 grid grid-cols-3 gap-6 text-center">
                { for METRICS.iter().map(|metric| html! {
                    <div>
                        <p class={format!("text-3xl font-black {}", metric.color)}>{ metric.value }</p>
                        <p class="text-xs text-muted-foreground font-bold uppercase tracking-widest mt-1">{ metric.label }</p>
                    </div>
                }) }
            </section>

            <section class="max-w-5xl mx-auto px-6 pb-20">
                <h2 class="text-2xl font-bold text-foreground text-center mb-6">{"Powerful Features"}</h2>
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                    { for POWERFUL_FEATURES.iter().map(|feature| html! {
                        <div class="bg-[#D8E1E8] rounded-xl p-4 text-center">
                            <div class="text-2xl">{ feature.icon }</div>
                            <p class="font-bold text-[#173E63] mt-2">{ feature.title }</p>
                            <p class="text-xs text-slate-500">{ feature.description }</p>
                        </div>
                    }) }
                </div>
                <div class="mt-10 text-center text-sm text-muted-foreground">
                    {"Already have an account?"}
                    <button class="ml-2 text-primary font-semibold" onclick={sign_in}>{"Sign in"}</button>
                </div>
            </section>
        </div>
    }
}
