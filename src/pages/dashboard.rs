use leptos::prelude::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="page dashboard-page">
            <h2>"MaxKernel"</h2>
            <p class="page-description">
                "Monitor the running kernel and tune its calibration values."
            </p>

            <div class="card-grid">
                <div class="card">
                    <h3>"Calibration"</h3>
                    <p>"Start a session, preview new values live and commit them with a comment"</p>
                    <a href="/calibration" class="btn btn-primary">"Calibrate"</a>
                </div>
                <div class="card">
                    <h3>"Objects"</h3>
                    <p>"Browse the kernel's objects and inspect their properties"</p>
                    <a href="/objects" class="btn btn-primary">"Inspect"</a>
                </div>
            </div>

            <div class="how-it-works">
                <h3>"Calibrating"</h3>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <div class="step-content">
                            <strong>"Start"</strong>
                            <p>"The kernel enters calibration mode and unlocks every value"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <div class="step-content">
                            <strong>"Preview"</strong>
                            <p>"Each edit is applied immediately and clamped to its allowed range"</p>
                        </div>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <div class="step-content">
                            <strong>"Commit or revert"</strong>
                            <p>"Keep the new values with a comment, or go back to the saved ones"</p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
