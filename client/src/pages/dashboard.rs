//! Dashboard page: contact entry, lookup, stats, and account actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Content renders only inside
//! `ProtectedRoute`; every request it starts is bound to the page's
//! `TaskScope` and aborted when the page unmounts, including the stats
//! refresh loop.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::types::{Activity, Contact};
use crate::state::auth::{AuthContext, AuthState};
use crate::state::dashboard::DashboardState;
use crate::state::notice::Notice;
use crate::util::auth::ProtectedRoute;

pub const CONTACT_REQUIRED_FIELDS_MESSAGE: &str = "All contact fields are required.";
pub const CONTACT_CREATED_MESSAGE: &str = "Contact added successfully.";
pub const SEARCH_REQUIRED_MESSAGE: &str = "Enter a registration number.";
pub const DELETE_PASSWORD_REQUIRED_MESSAGE: &str = "Enter your password to confirm.";

/// Trim every field and require all four.
pub fn validate_contact(form: &Contact) -> Result<Contact, &'static str> {
    let contact = Contact {
        mobile: form.mobile.trim().to_owned(),
        email: form.email.trim().to_owned(),
        address: form.address.trim().to_owned(),
        registration_number: form.registration_number.trim().to_owned(),
    };
    let fields = [&contact.mobile, &contact.email, &contact.address, &contact.registration_number];
    if fields.iter().any(|field| field.is_empty()) {
        return Err(CONTACT_REQUIRED_FIELDS_MESSAGE);
    }
    Ok(contact)
}

pub fn validate_search(registration_number: &str) -> Result<String, &'static str> {
    let value = registration_number.trim();
    if value.is_empty() {
        return Err(SEARCH_REQUIRED_MESSAGE);
    }
    Ok(value.to_owned())
}

pub fn validate_delete_password(password: &str) -> Result<String, &'static str> {
    if password.is_empty() {
        return Err(DELETE_PASSWORD_REQUIRED_MESSAGE);
    }
    Ok(password.to_owned())
}

/// Greeting line for the header.
pub fn greeting(state: &AuthState) -> String {
    state
        .user
        .as_ref()
        .map_or_else(|| "Welcome".to_owned(), |user| format!("Welcome, {}", user.display_name()))
}

/// Dashboard route. Renders a placeholder until the session is verified.
#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <DashboardContent/>
        </ProtectedRoute>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let auth = expect_context::<AuthContext>();
    let state = RwSignal::new(DashboardState::default());
    let form = RwSignal::new(Contact::default());
    let search = RwSignal::new(String::new());
    let confirming_delete = RwSignal::new(false);
    let delete_password = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    let scope = {
        let scope = crate::util::task::TaskScope::for_component();
        let auth = auth.clone();
        scope.spawn(async move {
            crate::state::dashboard::refresh_stats(&auth, gloo_timers::future::sleep, move |result| {
                state.update(|s| s.apply_stats(result));
            })
            .await;
        });
        scope
    };

    // Create contact.
    let create_auth = auth.clone();
    #[cfg(feature = "hydrate")]
    let create_scope = scope.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.get().submitting {
            return;
        }
        let contact = match validate_contact(&form.get()) {
            Ok(contact) => contact,
            Err(message) => {
                create_auth.notify(Notice::error(message));
                return;
            }
        };
        state.update(|s| s.submitting = true);

        #[cfg(feature = "hydrate")]
        {
            let auth = create_auth.clone();
            create_scope.spawn(async move {
                match auth.create_contact(&contact).await {
                    Ok(()) => {
                        auth.notify(Notice::success(CONTACT_CREATED_MESSAGE));
                        form.set(Contact::default());
                        let stats = auth.contact_stats().await;
                        state.update(|s| s.apply_stats(stats));
                    }
                    Err(message) => auth.notify(Notice::error(message)),
                }
                state.update(|s| s.submitting = false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = contact;
        }
    };

    // Search.
    let search_auth = auth.clone();
    #[cfg(feature = "hydrate")]
    let search_scope = scope.clone();
    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if state.get().searching {
            return;
        }
        let registration_number = match validate_search(&search.get()) {
            Ok(value) => value,
            Err(message) => {
                search_auth.notify(Notice::error(message));
                return;
            }
        };
        state.update(|s| s.searching = true);

        #[cfg(feature = "hydrate")]
        {
            let auth = search_auth.clone();
            search_scope.spawn(async move {
                let result = auth.search_contact(&registration_number).await;
                if let Err(message) = &result {
                    auth.notify(Notice::info(message.clone()));
                }
                state.update(|s| s.apply_search(&result));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration_number;
        }
    };

    // Account actions.
    let logout_auth = auth.clone();
    #[cfg(feature = "hydrate")]
    let logout_scope = scope.clone();
    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let auth = logout_auth.clone();
            logout_scope.spawn(async move { auth.logout().await });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &logout_auth;
        }
    };

    let delete_auth = auth;
    #[cfg(feature = "hydrate")]
    let delete_scope = scope;
    let on_delete = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let password = match validate_delete_password(&delete_password.get()) {
            Ok(password) => password,
            Err(message) => {
                delete_auth.notify(Notice::error(message));
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            let auth = delete_auth.clone();
            delete_scope.spawn(async move {
                if !auth.delete_account(&password).await {
                    delete_password.set(String::new());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = password;
        }
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <div>
                    <h1>"ContactHub"</h1>
                    <span class="dashboard-header__greeting">{move || greeting(&auth_state.get())}</span>
                </div>
                <div class="dashboard-header__actions">
                    <button class="btn" on:click=on_logout>"Logout"</button>
                    <button class="btn btn--danger" on:click=move |_| confirming_delete.update(|v| *v = !*v)>
                        "Delete Account"
                    </button>
                </div>
            </header>

            <Show when=move || confirming_delete.get()>
                <form class="dashboard-delete" on:submit=on_delete.clone()>
                    <p>"This permanently deletes your account. Enter your password to confirm."</p>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || delete_password.get()
                        on:input=move |ev| delete_password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--danger" type="submit">"Confirm delete"</button>
                </form>
            </Show>

            <div class="dashboard-grid">
                <section class="dashboard-stats">
                    <div class="stat-card">
                        <h3>"Total Contacts"</h3>
                        <p>{move || state.get().stats.map_or_else(|| "-".to_owned(), |s| s.total_contacts.to_string())}</p>
                    </div>
                    <div class="stat-card">
                        <h3>"Recent Added"</h3>
                        <p>{move || state.get().stats.map_or_else(|| "-".to_owned(), |s| s.recent_added.to_string())}</p>
                    </div>
                    <h2>"Recent Activity"</h2>
                    <ul class="activity-list">
                        <For
                            each=move || state.get().stats.map(|s| s.recent_activities).unwrap_or_default()
                            key=|activity: &Activity| format!("{}{}", activity.timestamp, activity.details)
                            children=|activity: Activity| view! {
                                <li class="activity-item">
                                    <p>{activity.details}</p>
                                    <p class="activity-item__time">{activity.timestamp}</p>
                                </li>
                            }
                        />
                    </ul>
                    <Show when=move || state.get().stats_error.is_some()>
                        <p class="dashboard-stats__error">{move || state.get().stats_error.unwrap_or_default()}</p>
                    </Show>
                </section>

                <section class="dashboard-main">
                    <form class="contact-form" on:submit=on_create>
                        <input
                            class="auth-input"
                            type="tel"
                            placeholder="Enter mobile number"
                            prop:value=move || form.get().mobile
                            on:input=move |ev| form.update(|f| f.mobile = event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="Enter email address"
                            prop:value=move || form.get().email
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                        <textarea
                            class="auth-input"
                            rows="3"
                            placeholder="Enter address"
                            prop:value=move || form.get().address
                            on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                        ></textarea>
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="Enter registration number"
                            prop:value=move || form.get().registration_number
                            on:input=move |ev| form.update(|f| f.registration_number = event_target_value(&ev))
                        />
                        <button class="btn btn--primary" type="submit" disabled=move || state.get().submitting>
                            "Add Contact"
                        </button>
                    </form>

                    <h2>"Search Contact"</h2>
                    <form class="contact-search" on:submit=on_search>
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="Enter registration number"
                            prop:value=move || search.get()
                            on:input=move |ev| search.set(event_target_value(&ev))
                        />
                        <button class="btn btn--primary" type="submit" disabled=move || state.get().searching>
                            {move || if state.get().searching { "Searching..." } else { "Search" }}
                        </button>
                    </form>
                    {move || {
                        state
                            .get()
                            .search_result
                            .map(|contact| {
                                view! {
                                    <dl class="contact-result">
                                        <dt>"Mobile"</dt>
                                        <dd>{contact.mobile}</dd>
                                        <dt>"Email"</dt>
                                        <dd>{contact.email}</dd>
                                        <dt>"Address"</dt>
                                        <dd>{contact.address}</dd>
                                    </dl>
                                }
                            })
                    }}
                </section>
            </div>
        </div>
    }
}
