use yew::prelude::*;

use crate::components::icon_log_out;
use crate::config::AppConfig;
use crate::hooks::auth::use_sign_out;
use crate::hooks::ApiHandle;
use crate::identity::{HttpIdentityProvider, IdentityHandle};
use crate::screens::dashboard::Dashboard;
use crate::screens::landing::Landing;
use crate::screens::sign_in::SignIn;
use crate::screens::sign_up::SignUp;
use crate::session::{use_session, SessionProvider, SessionState};
use crate::toast::ToastProvider;

/// Screens reachable without a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
    Landing,
    SignIn,
    SignUp,
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo(|_| AppConfig::from_env(), ());
    let api = use_memo(|config| ApiHandle::browser(config), (*config).clone());
    let identity = use_memo(
        |config| IdentityHandle::new(HttpIdentityProvider::browser(config)),
        (*config).clone(),
    );

    html! {
        <ContextProvider<ApiHandle> context={(*api).clone()}>
            <ToastProvider>
                <SessionProvider identity={(*identity).clone()}>
                    <Router />
                </SessionProvider>
            </ToastProvider>
        </ContextProvider<ApiHandle>>
    }
}

#[function_component(Router)]
fn router() -> Html {
    let session = use_session().session;
    let route = use_state(|| Route::Landing);

    let go = |target: Route| {
        let route = route.clone();
        Callback::from(move |_: ()| route.set(target))
    };

    match session.state() {
        SessionState::Uninitialized | SessionState::Loading => html! {
            <div class="min-h-screen flex items-center justify-center bg-background text-muted-foreground">
                {"Checking session..."}
            </div>
        },
        _ if session.is_signed_in() => html! {
            <Layout on_signed_out={go(Route::Landing)}>
                <Dashboard />
            </Layout>
        },
        _ => match *route {
            Route::Landing => html! { <Landing on_sign_in={go(Route::SignIn)} on_sign_up={go(Route::SignUp)} /> },
            Route::SignIn => html! { <SignIn on_sign_up={go(Route::SignUp)} /> },
            Route::SignUp => html! { <SignUp on_sign_in={go(Route::SignIn)} /> },
        },
    }
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    on_signed_out: Callback<()>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex flex-col h-screen bg-background">
            <Header on_signed_out={props.on_signed_out.clone()} />
            <main class="flex-1 overflow-y-auto">
                { for props.children.iter() }
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct HeaderProps {
    on_signed_out: Callback<()>,
}

#[function_component(Header)]
fn header(props: &HeaderProps) -> Html {
    let sign_out = use_sign_out();
    let on_logout = {
        let on_signed_out = props.on_signed_out.clone();
        Callback::from(move |_: MouseEvent| {
            sign_out.emit(());
            on_signed_out.emit(());
        })
    };

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex items-center gap-3">
                <div class="w-10 h-10 bg-[#173E63] rounded-full flex items-center justify-center text-white font-black">{"$"}</div>
                <span class="text-[#173E63] text-xl font-black tracking-tight">{"Expense Tracker"}</span>
            </div>
            <button onclick={on_logout} class="flex items-center gap-2 px-4 py-2 rounded-xl bg-[#173E63] text-[13px] font-medium text-slate-100 hover:opacity-90 transition-colors">
                { icon_log_out() }
                <span>{"Sign Out"}</span>
            </button>
        </header>
    }
}
