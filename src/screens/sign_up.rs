use yew::prelude::*;

use crate::components::input_field;
use crate::hooks::auth::use_sign_up;

#[derive(Properties, PartialEq)]
pub struct SignUpProps {
    /// Fires after registration, and from the "Sign in" link.
    pub on_sign_in: Callback<()>,
}

#[function_component(SignUp)]
pub fn sign_up(props: &SignUpProps) -> Html {
    let form = use_sign_up(props.on_sign_in.clone());
    let state = form.state.clone();

    let onsubmit = {
        let submit = form.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };
    let to_sign_in = props.on_sign_in.reform(|_: MouseEvent| ());

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Create account"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Start tracking your expenses."}</p>
                </div>

                <form class="space-y-4" {onsubmit}>
                    { input_field("Email", "email", "Enter email", &state.email, state.errors.get("email"), form.set_email.clone()) }
                    { input_field("Password", "password", "Enter password", &state.password, state.errors.get("password"), form.set_password.clone()) }

                    if let Some(message) = &state.error {
                        <div class="text-sm text-red-500">{ message.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={state.pending}
                    >
                        { if state.pending { "Please wait..." } else { "Sign up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    {"Already have an account?"}
                    <button class="ml-2 text-primary font-semibold" onclick={to_sign_in}>{"Sign in"}</button>
                </div>
            </div>
        </div>
    }
}
