use yew::prelude::*;

use crate::components::input_field;
use crate::hooks::auth::use_sign_in;

#[derive(Properties, PartialEq)]
pub struct SignInProps {
    pub on_sign_up: Callback<()>,
}

#[function_component(SignIn)]
pub fn sign_in(props: &SignInProps) -> Html {
    let form = use_sign_in();
    let state = form.state.clone();

    let onsubmit = {
        let submit = form.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };
    let to_sign_up = props.on_sign_up.reform(|_: MouseEvent| ());

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Sign in"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Welcome back. Sign in to continue."}</p>
                </div>

                <form class="space-y-4" {onsubmit}>
                    { input_field("Email", "email", "Enter email", &state.email, state.errors.get("email"), form.set_email.clone()) }
                    { input_field("Password", "password", "Enter password", &state.password, state.errors.get("password"), form.set_password.clone()) }

                    if let Some(message) = &state.error {
                        <div class="text-sm text-red-500">{ message.clone() }</div>
                    }

                    <button
                        type="submit"
                        class={if state.pending { "w-full bg-slate-400 text-white py-2 rounded-lg font-semibold" } else { "w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity" }}
                        disabled={state.pending}
                    >
                        { if state.pending { "Please wait..." } else { "Continue" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    {"Don't have an account?"}
                    <button class="ml-2 text-primary font-semibold" onclick={to_sign_up}>{"Sign up"}</button>
                </div>
            </div>
        </div>
    }
}
