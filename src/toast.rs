use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

const VISIBLE_LIMIT: usize = 3;
const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title, message)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u32,
    entries: Vec<(u32, Toast)>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u32),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(toast) => {
                next.entries.push((next.next_id, toast));
                next.next_id = next.next_id.wrapping_add(1);
                if next.entries.len() > VISIBLE_LIMIT {
                    let overflow = next.entries.len() - VISIBLE_LIMIT;
                    next.entries.drain(..overflow);
                }
            }
            ToastAction::Dismiss(id) => next.entries.retain(|(entry, _)| *entry != id),
        }
        Rc::new(next)
    }
}

impl ToastQueue {
    pub fn entries(&self) -> &[(u32, Toast)] {
        &self.entries
    }
}

/// What hooks use to raise a notification.
#[derive(Clone, PartialEq)]
pub struct ToastContext(pub Callback<Toast>);

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);

    let push = {
        let queue = queue.dispatcher();
        Callback::from(move |toast: Toast| queue.dispatch(ToastAction::Push(toast)))
    };
    let dismiss = {
        let queue = queue.dispatcher();
        Callback::from(move |id: u32| queue.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<ToastContext> context={ToastContext(push)}>
            { for props.children.iter() }
            <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80">
                { for queue.entries().iter().map(|(id, toast)| html! {
                    <ToastItem key={*id} id={*id} toast={toast.clone()} on_dismiss={dismiss.clone()} />
                }) }
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    id: u32,
    toast: Toast,
    on_dismiss: Callback<u32>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |id: &u32| {
                let id = *id;
                let timeout = Timeout::new(DISMISS_AFTER_MS, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            props.id,
        );
    }

    let accent = match props.toast.kind {
        ToastKind::Success => "border-l-4 border-green-500",
        ToastKind::Error => "border-l-4 border-red-500",
        ToastKind::Info => "border-l-4 border-blue-500",
    };
    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.id;
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={format!("bg-white rounded-xl shadow-lg px-4 py-3 cursor-pointer {}", accent)} onclick={onclick}>
            <p class="text-sm font-bold text-[#173E63]">{ props.toast.title.clone() }</p>
            <p class="text-xs text-slate-500 mt-1">{ props.toast.message.clone() }</p>
        </div>
    }
}

#[hook]
pub fn use_toast() -> Callback<Toast> {
    match use_context::<ToastContext>() {
        Some(ToastContext(push)) => push,
        None => Callback::from(|toast: Toast| {
            log::info!("[toast] {}: {}", toast.title, toast.message);
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(queue: Rc<ToastQueue>, title: &str) -> Rc<ToastQueue> {
        queue.reduce(ToastAction::Push(Toast::info(title, "")))
    }

    #[test]
    fn queue_keeps_latest_entries() {
        let mut queue = Rc::new(ToastQueue::default());
        for title in ["a", "b", "c", "d"] {
            queue = push(queue, title);
        }
        let titles: Vec<&str> = queue.entries().iter().map(|(_, t)| t.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c", "d"]);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let queue = push(push(Rc::new(ToastQueue::default()), "a"), "b");
        let first = queue.entries()[0].0;
        let queue = queue.reduce(ToastAction::Dismiss(first));
        assert_eq!(queue.entries().len(), 1);
        assert_eq!(queue.entries()[0].1.title, "b");
    }
}
