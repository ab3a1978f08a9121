use chrono::NaiveDate;
use yew::prelude::*;

use crate::models::BudgetStatus;

pub const TREND_LABELS: [&str; 4] = ["Week 1", "Week 2", "Week 3", "Week 4"];

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

/// White rounded panel with a heading, used for every dashboard section.
pub fn card(title: &'static str, children: Html) -> Html {
    html! {
        <div class="bg-card rounded-[10px] p-6 border border-border shadow-sm">
            <h3 class="font-bold text-foreground text-lg mb-3">{ title }</h3>
            { children }
        </div>
    }
}

/// Labelled text input with its inline validation message.
pub fn input_field(
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    value: &str,
    error: Option<&str>,
    on_change: Callback<String>,
) -> Html {
    let border = if error.is_some() { "border-red-500" } else { "border-input" };
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            <input
                type={input_type}
                placeholder={placeholder}
                class={format!("w-full px-4 py-2 bg-input border {} rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary", border)}
                value={value.to_string()}
                oninput={Callback::from(move |e: InputEvent| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    on_change.emit(input.value());
                })}
            />
            if let Some(message) = error {
                <p class="text-xs text-red-500">{ message.to_string() }</p>
            }
        </div>
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    UpRight,
    CreditCard,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub amount: f64,
    pub icon: StatIcon,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ format_currency(props.amount) }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::UpRight => icon_arrow_up_right(),
                        StatIcon::CreditCard => icon_credit_card(),
                    }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    /// Fill fraction in `[0, 1]`.
    pub fraction: f64,
    #[prop_or_default]
    pub status: BudgetStatus,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let fill = match props.status {
        BudgetStatus::Exceeded => "bg-red-500",
        BudgetStatus::Warning => "bg-amber-500",
        BudgetStatus::Good => "bg-primary",
    };
    let percent = (props.fraction.clamp(0.0, 1.0) * 100.0).round();

    html! {
        <div class="mt-1 h-2 w-full bg-secondary rounded-full overflow-hidden">
            <div class={format!("h-full {}", fill)} style={format!("width: {}%", percent)}></div>
        </div>
    }
}

#[function_component(Spinner)]
pub fn spinner() -> Html {
    html! {
        <div class="flex-1 flex items-center justify-center py-24">
            <div class="w-10 h-10 border-4 border-[#B2CBDE] border-t-[#173E63] rounded-full animate-spin"></div>
        </div>
    }
}

/// Four cumulative weekly points; a non-positive total charts flat at zero.
pub fn spending_trend(total: f64) -> [f64; 4] {
    if total > 0.0 {
        [total * 0.25, total * 0.5, total * 0.75, total]
    } else {
        [0.0; 4]
    }
}

#[derive(Properties, PartialEq)]
pub struct TrendChartProps {
    pub total: f64,
}

#[function_component(TrendChart)]
pub fn trend_chart(props: &TrendChartProps) -> Html {
    const WIDTH: f64 = 320.0;
    const HEIGHT: f64 = 160.0;
    const PAD: f64 = 24.0;

    let series = spending_trend(props.total);
    let peak = series.iter().cloned().fold(0.0_f64, f64::max);
    let step = (WIDTH - 2.0 * PAD) / (series.len() - 1) as f64;
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = PAD + step * i as f64;
            let y = if peak > 0.0 {
                HEIGHT - PAD - (value / peak) * (HEIGHT - 2.0 * PAD)
            } else {
                HEIGHT - PAD
            };
            (x, y)
        })
        .collect();
    let polyline = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    html! {
        <svg viewBox={format!("0 0 {} {}", WIDTH, HEIGHT)} class="w-full h-56">
            <line x1={PAD.to_string()} y1={(HEIGHT - PAD).to_string()} x2={(WIDTH - PAD).to_string()} y2={(HEIGHT - PAD).to_string()} stroke="#D8E1E8" />
            <polyline points={polyline} fill="none" stroke="rgb(0, 122, 255)" stroke-width="2" />
            { for points.iter().zip(series.iter()).zip(TREND_LABELS.iter()).map(|(((x, y), value), label)| html! {
                <g>
                    <circle cx={x.to_string()} cy={y.to_string()} r="3" fill="rgb(0, 122, 255)" />
                    <text x={x.to_string()} y={(y - 8.0).to_string()} text-anchor="middle" class="text-[8px] fill-slate-500">{ format!("{:.2}", value) }</text>
                    <text x={x.to_string()} y={(HEIGHT - 6.0).to_string()} text-anchor="middle" class="text-[9px] fill-slate-600">{ *label }</text>
                </g>
            }) }
        </svg>
    }
}

fn format_with_commas(value: u64) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Dollar amount with two decimals and thousands separators.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_with_commas(cents / 100), cents % 100)
}

/// Calendar date of a backend timestamp, e.g. `Oct 16, 2026`. Anything
/// unparseable is shown as sent.
pub fn display_date(raw: &str) -> String {
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|day| day.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_arrow_up_right() -> Html {
    icon_base("M7 17L17 7M7 7h10v10")
}
