use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::input_field;
use crate::hooks::add_expense::use_add_expense;
use crate::hooks::categories::use_categories;
use crate::validation::ExpenseField;

#[derive(Properties, PartialEq)]
pub struct AddExpenseModalProps {
    pub visible: bool,
    pub on_close: Callback<()>,
    pub on_success: Callback<()>,
}

#[function_component(AddExpenseModal)]
pub fn add_expense_modal(props: &AddExpenseModalProps) -> Html {
    let expense = use_add_expense(props.on_success.clone(), props.on_close.clone(), props.visible);
    let categories = use_categories();

    if !props.visible {
        return html! {};
    }

    let state = expense.state.clone();
    let busy = state.submitting;
    let edit = |field: ExpenseField| expense.set_field.reform(move |value: String| (field, value));

    let on_category = expense.set_field.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        (ExpenseField::Category, select.value())
    });
    let on_date = expense.set_field.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        (ExpenseField::Date, input.value())
    });
    let on_notes = expense.set_field.reform(|e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        (ExpenseField::Notes, input.value())
    });
    let on_submit = expense.submit.reform(|_: MouseEvent| ());
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    let field_error = |field: ExpenseField| match state.errors.get(field.key()) {
        Some(message) => html! { <p class="text-xs text-red-500">{ message.to_string() }</p> },
        None => html! {},
    };

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/50 p-4">
            <div class="w-full max-w-lg bg-white rounded-2xl shadow-lg p-6">
                <h2 class="text-xl font-bold text-gray-800 mb-4">{"Add New Expense"}</h2>

                <div class="space-y-4 max-h-[28rem] overflow-y-auto">
                    { input_field("Amount *", "text", "0.00", &state.form.amount, state.errors.get("amount"), edit(ExpenseField::Amount)) }
                    { input_field("Description *", "text", "Enter description", &state.form.description, state.errors.get("description"), edit(ExpenseField::Description)) }

                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Category *"}</label>
                        <select class="w-full px-4 py-2 bg-input border border-input rounded-lg" onchange={on_category} disabled={busy}>
                            <option value="" selected={state.form.category.is_empty()}>
                                { if categories.loading { "Loading categories..." } else { "Select a category..." } }
                            </option>
                            { for categories.categories.iter().map(|category| html! {
                                <option key={category.id.clone()} value={category.id.clone()} selected={category.id == state.form.category}>
                                    { category.name.clone() }
                                </option>
                            }) }
                        </select>
                        { field_error(ExpenseField::Category) }
                    </div>

                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Date *"}</label>
                        <input type="date" class="w-full px-4 py-2 bg-input border border-input rounded-lg" value={state.form.date.clone()} oninput={on_date} disabled={busy} />
                        { field_error(ExpenseField::Date) }
                    </div>

                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Notes (Optional)"}</label>
                        <textarea class="w-full px-4 py-2 bg-input border border-input rounded-lg" rows="3" placeholder="Add notes..." value={state.form.notes.clone()} oninput={on_notes} disabled={busy}></textarea>
                        { field_error(ExpenseField::Notes) }
                    </div>

                    if let Some(message) = &state.error {
                        <p class="text-sm text-red-500">{ message.clone() }</p>
                    }
                </div>

                <div class="mt-6 flex gap-3">
                    <button class="flex-1 border border-gray-300 rounded-lg py-2 font-semibold text-gray-700" onclick={on_cancel} disabled={busy}>
                        {"Cancel"}
                    </button>
                    <button class="flex-1 bg-blue-600 text-white rounded-lg py-2 font-semibold disabled:opacity-60" onclick={on_submit} disabled={busy}>
                        { if busy { "Saving..." } else { "Add Expense" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
