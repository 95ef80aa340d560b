use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: ReadSignal<u64>,
    set_next_id: WriteSignal<u64>,
}

impl ToastContext {
    pub fn push(&self, message: String, level: ToastLevel) {
        let currentId = self.next_id.get_untracked();
        self.set_next_id.set(currentId + 1);

        self.set_toasts.update(|toasts| {
            toasts.push(Toast {
                id: currentId,
                message,
                level,
            });
        });

        let setToasts = self.set_toasts;
        set_timeout(
            move || {
                setToasts.update(|toasts| {
                    toasts.retain(|t| t.id != currentId);
                });
            },
            std::time::Duration::from_secs(5),
        );
    }
}

/// Shows a toast whenever a server action finishes: `success` on `Ok`, the
/// server error message on `Err`.
pub fn notify_result<T>(
    value: RwSignal<Option<Result<T, ServerFnError>>>,
    success: &'static str,
) where
    T: Send + Sync + 'static,
{
    let Some(ctx) = use_context::<ToastContext>() else {
        return;
    };
    Effect::new(move |_| {
        value.with(|result| match result {
            Some(Ok(_)) => ctx.push(success.to_string(), ToastLevel::Success),
            Some(Err(e)) => ctx.push(e.to_string(), ToastLevel::Error),
            None => {}
        });
    });
}

fn toast_class(level: &ToastLevel) -> &'static str {
    match level {
        ToastLevel::Success => "toast toast-success",
        ToastLevel::Error => "toast toast-error",
    }
}

/// Provides toast context and renders the toast container.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let (toasts, setToasts) = signal(Vec::<Toast>::new());
    let (nextId, setNextId) = signal(0u64);

    provide_context(ToastContext {
        set_toasts: setToasts,
        next_id: nextId,
        set_next_id: setNextId,
    });

    view! {
        {children()}
        <div class="toast-container">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                let:toast
            >
                <div class=toast_class(&toast.level)>
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}
