//! Todo Filters Component
//!
//! Footer row: remaining-count label, filter buttons, clear-completed.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::TodoFilter;
use crate::selectors::filter_counts;

/// Filter buttons in display order, with their labels
const FILTERS: &[(TodoFilter, &str)] = &[
    (TodoFilter::All, "All"),
    (TodoFilter::Pending, "Active"),
    (TodoFilter::Completed, "Completed"),
];

#[component]
pub fn TodoFilters() -> impl IntoView {
    let ctx = use_app_context();
    let state = ctx.state;

    let counts = move || filter_counts(&state.get());

    // the label counts whatever the current filter shows
    let items_left = move || {
        let counts = counts();
        let shown = match state.get().filter {
            TodoFilter::All => counts.all,
            TodoFilter::Pending => counts.pending,
            TodoFilter::Completed => counts.completed,
        };
        format!("{} items left", shown)
    };

    let clear_label = move || {
        let completed = counts().completed;
        if completed > 0 {
            format!("Clear completed ({})", completed)
        } else {
            "Clear completed".to_string()
        }
    };

    let clear_store = ctx.store.clone();

    view! {
        <div class="todo-list-filter">
            <div class="todo-list-filter-left">
                <span class="todo-list-filter-count">{items_left}</span>
            </div>

            <div class="todo-list-filter-center">
                {FILTERS.iter().map(|(filter, label)| {
                    let filter = *filter;
                    let store = ctx.store.clone();
                    let is_selected = move || state.get().filter == filter;
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if is_selected() {
                                    "todo-list-filter-button selected"
                                } else {
                                    "todo-list-filter-button"
                                }
                            }
                            data-filter=filter.as_str()
                            on:click=move |_| store.set_filter(filter)
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </div>

            <div class="todo-list-filter-right">
                <button
                    type="button"
                    class=move || {
                        if counts().completed == 0 {
                            "todo-list-filter-clear-completed disabled"
                        } else {
                            "todo-list-filter-clear-completed"
                        }
                    }
                    prop:disabled=move || counts().completed == 0
                    on:click=move |_| clear_store.clear_completed()
                >
                    {clear_label}
                </button>
            </div>
        </div>
    }
}
