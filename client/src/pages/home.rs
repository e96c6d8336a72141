//! Public landing page.

use leptos::prelude::*;

use crate::components::layout::Layout;

const FEATURES: [(&str, &str); 3] = [
    (
        "Easy QR Creation",
        "Create professional QR codes in seconds. Simply add your content and generate a scannable code instantly.",
    ),
    (
        "Multi-Language Support",
        "Your content automatically translates to 35+ languages, making it accessible to a global audience.",
    ),
    (
        "Analytics & Management",
        "Track views, manage your QR codes, and control access with our powerful admin dashboard.",
    ),
];

const STEPS: [(&str, &str); 3] = [
    ("Create Account", "Sign up for free and access your admin dashboard to manage your QR codes."),
    ("Add Information", "Fill in the medicine details: usage, dosage, dates, batch and storage."),
    ("Generate & Share", "Get your QR code instantly and share it anywhere. Users can scan and view in their language."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Layout>
            <section class="hero">
                <h1 class="hero__title">"InfoMed"</h1>
                <p class="hero__lead">
                    "Create, manage, and share medicine information effortlessly with QR codes. "
                    "Provide instant access to dosage, usage instructions, and safety details in multiple languages."
                </p>
                <div class="hero__actions">
                    <a href="/signup" class="btn btn--lg">"Get Started - It's Free"</a>
                    <a href="/login" class="btn btn--outline btn--lg">"Admin Login"</a>
                </div>
            </section>

            <section class="features">
                {FEATURES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <div class="card feature">
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>

            <section class="steps">
                <h2>"How It Works"</h2>
                <ol class="steps__list">
                    {STEPS
                        .iter()
                        .map(|(title, body)| {
                            view! {
                                <li class="steps__item">
                                    <h3>{*title}</h3>
                                    <p>{*body}</p>
                                </li>
                            }
                        })
                        .collect_view()}
                </ol>
            </section>

            <section class="cta">
                <h2>"Ready to Get Started?"</h2>
                <a href="/signup" class="btn btn--secondary btn--lg">"Create Your First QR Code"</a>
            </section>
        </Layout>
    }
}
