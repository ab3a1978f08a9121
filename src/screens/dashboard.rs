use yew::prelude::*;

use crate::components::{
    card, display_date, format_currency, icon_plus, page_shell, ProgressBar, Spinner, StatCard, StatIcon,
    TrendChart,
};
use crate::hooks::analytics::use_analytics_summary;
use crate::models::{AnalyticsSummary, ExpenseItem};
use crate::screens::add_expense_modal::AddExpenseModal;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let analytics = use_analytics_summary();
    let show_add = use_state(|| false);
    let state = analytics.state.clone();

    let open_add = {
        let show_add = show_add.clone();
        Callback::from(move |_: MouseEvent| show_add.set(true))
    };
    let close_add = {
        let show_add = show_add.clone();
        Callback::from(move |_: ()| show_add.set(false))
    };

    if state.loading {
        return html! { <Spinner /> };
    }

    if let Some(error) = &state.error {
        let retry = analytics.refetch.reform(|_: MouseEvent| ());
        return html! {
            <div class="flex-1 flex flex-col items-center justify-center p-6 py-24">
                <p class="mb-4 text-center text-red-500">{ format!("Error: {}", error) }</p>
                <button onclick={retry} class="rounded-xl bg-blue-500 px-4 py-2 text-white font-bold text-sm">{"Retry"}</button>
            </div>
        };
    }

    let summary = state.summary.clone().unwrap_or_default();

    html! {
        <>
            { page_shell(
                "Dashboard",
                html! {
                    <button onclick={open_add} class="flex items-center gap-2 bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm hover:opacity-90 transition-all">
                        { icon_plus() }
                        {"Add Expense"}
                    </button>
                },
                html! {
                    <>
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                            <StatCard title="TOTAL EXPENSES THIS MONTH" amount={summary.total_expenses} icon={StatIcon::CreditCard} />
                            <StatCard title="AVERAGE EXPENSE" amount={summary.avg_expense} icon={StatIcon::UpRight} />
                            <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border">
                                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{"TRANSACTIONS"}</p>
                                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ summary.total_count.to_string() }</h3>
                            </div>
                        </div>

                        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                            { budget_progress(&summary) }
                            { card("Spending Trends", html! { <TrendChart total={summary.total_expenses} /> }) }
                        </div>

                        { recent_transactions(&state.expenses) }
                    </>
                }
            ) }
            <AddExpenseModal visible={*show_add} on_close={close_add} on_success={analytics.refetch.clone()} />
        </>
    }
}

fn budget_progress(summary: &AnalyticsSummary) -> Html {
    let body = if summary.budget_comparison.is_empty() {
        html! { <p class="text-sm text-muted-foreground">{"No budgets found"}</p> }
    } else {
        html! {
            <div class="space-y-3">
                { for summary.budget_comparison.iter().map(|comparison| html! {
                    <div key={comparison.budget.id.clone()} class="text-sm">
                        <p class="text-foreground">
                            { format!(
                                "{}: {} / {}",
                                comparison.budget.name,
                                format_currency(comparison.spent),
                                format_currency(comparison.budget.amount)
                            ) }
                        </p>
                        <ProgressBar fraction={comparison.progress()} status={comparison.status} />
                    </div>
                }) }
            </div>
        }
    };
    card("Budget Progress", body)
}

fn recent_transactions(expenses: &[ExpenseItem]) -> Html {
    if expenses.is_empty() {
        return card(
            "Recent Transactions",
            html! { <p class="text-sm text-muted-foreground">{"No recent transactions"}</p> },
        );
    }

    html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
            <div class="p-6 flex justify-between items-center border-b border-border">
                <h3 class="font-bold text-foreground text-lg">{"Recent Transactions"}</h3>
            </div>
            <div class="overflow-x-auto">
                <table class="w-full text-left border-collapse">
                    <thead>
                        <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                            <th class="px-8 py-4 font-bold">{"Date"}</th>
                            <th class="px-8 py-4 font-bold">{"Description"}</th>
                            <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        { for expenses.iter().enumerate().map(|(idx, expense)| html! {
                            <tr key={format!("{}-{}", idx, expense.id)} class="text-sm hover:bg-muted/30 transition-colors">
                                <td class="px-8 py-4 text-muted-foreground">{ display_date(&expense.date) }</td>
                                <td class="px-8 py-4 text-foreground">{ &expense.title }</td>
                                <td class="px-8 py-4 text-right font-semibold text-foreground">{ format_currency(expense.amount) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}
