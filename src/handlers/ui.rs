// src/handlers/ui.rs
use axum::{response::Html, routing::get, Router};

pub fn ui_routes() -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/results", get(results_page))
}

pub async fn home_page() -> Html<String> {
    let html = r###"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ML Systems Reasoning Assistant</title>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            color: #111;
            background: #fff;
            line-height: 1.6;
        }
        main { max-width: 900px; margin: 0 auto; padding: 24px; }
        h1 { font-size: 28px; margin-bottom: 8px; }
        h2 { font-size: 18px; margin-bottom: 12px; }
        section { margin-bottom: 32px; }
        .caption { opacity: 0.75; }
        .muted { opacity: 0.6; }
        .error { color: #b00020; }
        textarea {
            width: 100%;
            padding: 12px;
            border-radius: 8px;
            border: 1px solid #ccc;
            font-size: 14px;
            font-family: inherit;
        }
        .actions { margin-top: 12px; display: flex; gap: 10px; }
        button {
            padding: 10px 16px;
            border-radius: 8px;
            border: 1px solid #ccc;
            background: #fff;
            color: #000;
            cursor: pointer;
        }
        button.primary { background: #000; color: #fff; border: none; }
        button:disabled { cursor: not-allowed; opacity: 0.6; }
        #scenarios { display: flex; flex-wrap: wrap; gap: 10px; }
        button.scenario.selected { background: #f0f0f0; }
        .panel {
            background: #f7f7f7;
            padding: 16px;
            border-radius: 8px;
            font-size: 13px;
            overflow-x: auto;
        }
        .block { margin-bottom: 12px; }
        .block:last-child { margin-bottom: 0; }
        .label { font-weight: 700; margin-bottom: 6px; }
        ul { margin: 0; padding-left: 18px; }
        li { margin-bottom: 4px; }
        #fallback { max-width: 900px; margin: 80px auto; padding: 24px; text-align: center; }
        .footer a { color: inherit; }
    </style>
</head>
<body>
    <main>
        <section>
            <h1>ML Systems Reasoning Assistant</h1>
            <p class="caption">Diagnose why ML systems fail in production — with checks, causes, and actions.</p>
        </section>

        <section>
            <h2>Demo Scenarios (1-click)</h2>
            <div id="scenarios"><p class="muted">Loading scenarios…</p></div>
        </section>

        <section>
            <h2>Custom Prompt (optional)</h2>
            <textarea id="prompt" rows="4" placeholder="Describe the ML production issue you are seeing…"></textarea>
            <div class="actions">
                <button id="run" class="primary" disabled>Run Diagnosis</button>
                <button id="reset">Reset</button>
            </div>
        </section>

        <section>
            <h2>Diagnosis Output</h2>
            <p id="error" class="error" hidden></p>
            <p id="placeholder" class="muted">Run a scenario to see structured reasoning output here.</p>
            <div id="result" class="panel" hidden>
                <div class="block">
                    <div class="label">Summary</div>
                    <div id="summary"></div>
                </div>
                <div class="block">
                    <div class="label">Checks to run</div>
                    <div id="checks"></div>
                </div>
                <div class="block">
                    <div class="label">Likely causes</div>
                    <div id="causes"></div>
                </div>
                <div class="block">
                    <div class="label">Recommended actions</div>
                    <div id="actions"></div>
                </div>
            </div>
        </section>

        <p class="footer"><a href="/results">Diagnosis history</a></p>
    </main>

    <div id="fallback" hidden>
        <h2>Something went wrong</h2>
        <p class="muted">The page hit an unexpected error while rendering.</p>
        <button onclick="location.reload()">Try again</button>
    </div>

    <script>
        let scenarios = [];
        let selectedScenarioId = null;
        let loading = false;

        const $ = (id) => document.getElementById(id);

        function esc(text) {
            const div = document.createElement("div");
            div.textContent = String(text);
            return div.innerHTML;
        }

        function renderList(el, items, emptyText) {
            if (!Array.isArray(items) || items.length === 0) {
                el.innerHTML = '<span class="muted">' + emptyText + '</span>';
                return;
            }
            el.innerHTML = "<ul>" + items.map((item) => "<li>" + esc(item) + "</li>").join("") + "</ul>";
        }

        function syncRunButton() {
            $("run").disabled = loading || !$("prompt").value;
            $("run").textContent = loading ? "Running…" : "Run Diagnosis";
        }

        function renderScenarios() {
            const box = $("scenarios");
            if (scenarios.length === 0) {
                box.innerHTML = '<p class="muted">No scenarios found yet (or API not reachable).</p>';
                return;
            }
            box.innerHTML = "";
            scenarios.forEach((scenario) => {
                const button = document.createElement("button");
                button.className = "scenario" + (scenario.id === selectedScenarioId ? " selected" : "");
                button.textContent = scenario.title;
                button.onclick = () => {
                    selectedScenarioId = scenario.id;
                    $("prompt").value = scenario.description;
                    renderScenarios();
                    runDiagnosis(scenario.description, scenario.id);
                };
                box.appendChild(button);
            });
        }

        async function loadScenarios() {
            try {
                const res = await fetch("/api/scenarios");
                if (!res.ok) throw new Error("Failed to load scenarios (" + res.status + ")");
                const data = await res.json();
                scenarios = Array.isArray(data) ? data : [];
            } catch {
                scenarios = [];
            }
            renderScenarios();
        }

        async function runDiagnosis(prompt, scenarioId) {
            loading = true;
            syncRunButton();
            $("error").hidden = true;
            $("result").hidden = true;
            $("placeholder").hidden = false;

            try {
                const res = await fetch("/api/diagnose", {
                    method: "POST",
                    headers: { "Content-Type": "application/json" },
                    body: JSON.stringify({ prompt: prompt, scenarioId: scenarioId ?? null }),
                });

                if (!res.ok) {
                    const text = await res.text().catch(() => "");
                    throw new Error(text || "Diagnosis failed");
                }

                renderResult(await res.json());
            } catch (e) {
                $("error").textContent = e && e.message ? e.message : "Something went wrong";
                $("error").hidden = false;
            } finally {
                loading = false;
                syncRunButton();
            }
        }

        function renderResult(data) {
            const diagnosis =
                data && data.diagnosis && typeof data.diagnosis === "object" ? data.diagnosis : {};

            $("placeholder").hidden = true;
            $("result").hidden = false;
            $("summary").innerHTML = diagnosis.summary
                ? esc(diagnosis.summary)
                : '<span class="muted">No summary returned.</span>';
            renderList($("checks"), diagnosis.checks, "No checks returned.");
            renderList($("causes"), diagnosis.causes, "No causes returned.");
            renderList($("actions"), diagnosis.actions, "No actions returned.");
        }

        $("run").onclick = () => runDiagnosis($("prompt").value, selectedScenarioId);
        $("reset").onclick = () => {
            selectedScenarioId = null;
            $("prompt").value = "";
            $("error").hidden = true;
            $("result").hidden = true;
            $("placeholder").hidden = false;
            renderScenarios();
            syncRunButton();
        };
        $("prompt").addEventListener("input", syncRunButton);

        window.addEventListener("error", () => {
            document.querySelector("main").hidden = true;
            $("fallback").hidden = false;
        });

        loadScenarios();
    </script>
</body>
</html>
    "###;

    Html(html.to_string())
}

pub async fn results_page() -> Html<String> {
    let html = r###"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Diagnosis History</title>
    <style>
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0;
            color: #111;
            background: #fff;
            line-height: 1.6;
        }
        main { max-width: 900px; margin: 40px auto; padding: 0 16px; }
        h1 { font-size: 28px; font-weight: 700; }
        .muted { opacity: 0.6; }
        .error-title { font-weight: 600; color: #b00020; }
        .error-details { margin-top: 6px; font-family: monospace; font-size: 12px; color: #b00020; }
        #runs { margin-top: 16px; display: grid; gap: 12px; }
        .card {
            border: 1px solid #ddd;
            border-radius: 10px;
            padding: 12px;
            background: white;
        }
        .card-header { display: flex; justify-content: space-between; gap: 12px; }
        .summary { font-weight: 650; }
        .timestamp { font-size: 12px; color: #666; }
        .input-label { font-size: 12px; color: #666; margin-top: 8px; }
        .sections { margin-top: 10px; display: grid; gap: 10px; }
        .label { font-weight: 650; }
        ul { margin: 6px 0 0; padding-left: 18px; }
        .nav a { color: inherit; }
    </style>
</head>
<body>
    <main>
        <h1>Diagnosis History</h1>
        <p class="nav"><a href="/">Back to diagnosis</a></p>

        <p id="loading">Loading…</p>
        <div id="error-box" hidden>
            <div class="error-title">Failed to load results</div>
            <div id="error-details" class="error-details"></div>
        </div>
        <p id="empty" hidden>No diagnosis runs yet.</p>
        <div id="runs"></div>
    </main>

    <script>
        const $ = (id) => document.getElementById(id);

        function esc(text) {
            const div = document.createElement("div");
            div.textContent = String(text);
            return div.innerHTML;
        }

        // Sections with nothing in them are omitted entirely.
        function section(title, items) {
            if (!Array.isArray(items) || items.length === 0) return "";
            return (
                '<div><div class="label">' + title + "</div><ul>" +
                items.map((item) => "<li>" + esc(item) + "</li>").join("") +
                "</ul></div>"
            );
        }

        function renderRuns(runs) {
            if (runs.length === 0) {
                $("empty").hidden = false;
                return;
            }
            $("runs").innerHTML = runs
                .map((run) => {
                    const diagnosis = run.diagnosis && typeof run.diagnosis === "object" ? run.diagnosis : {};
                    return (
                        '<div class="card">' +
                        '<div class="card-header">' +
                        '<div class="summary">' + esc(diagnosis.summary ?? "No summary") + "</div>" +
                        '<div class="timestamp">' + esc(new Date(run.created_at).toLocaleString()) + "</div>" +
                        "</div>" +
                        '<div class="input-label">Input</div>' +
                        "<div>" + esc(run.input) + "</div>" +
                        '<div class="sections">' +
                        section("Checks", diagnosis.checks) +
                        section("Causes", diagnosis.causes) +
                        section("Actions", diagnosis.actions) +
                        section("Evidence", diagnosis.evidence) +
                        "</div>" +
                        "</div>"
                    );
                })
                .join("");
        }

        async function loadRuns() {
            try {
                const res = await fetch("/api/results");
                if (!res.ok) {
                    const text = await res.text();
                    throw new Error("GET /api/results failed: " + res.status + " " + text);
                }
                const data = await res.json();
                $("loading").hidden = true;
                renderRuns(Array.isArray(data.results) ? data.results : []);
            } catch (e) {
                $("loading").hidden = true;
                $("error-box").hidden = false;
                $("error-details").textContent = e && e.message ? e.message : String(e);
            }
        }

        loadRuns();
    </script>
</body>
</html>
    "###;

    Html(html.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn page_body(uri: &str) -> (StatusCode, String) {
        let app = ui_routes();
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn home_page_serves_the_diagnosis_form() {
        let (status, body) = page_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Run Diagnosis"));
        assert!(body.contains("/api/diagnose"));
        assert!(body.contains("No summary returned."));
    }

    #[tokio::test]
    async fn results_page_serves_the_history_view() {
        let (status, body) = page_body("/results").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Diagnosis History"));
        assert!(body.contains("/api/results"));
    }
}
