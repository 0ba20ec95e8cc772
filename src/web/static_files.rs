//! Static page for the web UI.
//!
//! The page is embedded directly in the binary for easy deployment.

use axum::{http::header, response::IntoResponse};

/// Landing page: a question box that posts to `/ask` and tabulates the rows.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>askql</title>
    <style>
        :root {
            --bg-primary: #0f172a;
            --bg-secondary: #1e293b;
            --text-primary: #f1f5f9;
            --text-secondary: #94a3b8;
            --accent: #3b82f6;
            --error: #ef4444;
            --border: #475569;
        }
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
        }
        .container { max-width: 960px; margin: 0 auto; padding: 32px 20px; }
        h1 { font-size: 1.6rem; margin-bottom: 4px; }
        .hint { color: var(--text-secondary); margin-bottom: 20px; font-size: 0.9rem; }
        form { display: flex; gap: 8px; margin-bottom: 24px; }
        input {
            flex: 1;
            padding: 10px 14px;
            border-radius: 6px;
            border: 1px solid var(--border);
            background: var(--bg-secondary);
            color: var(--text-primary);
        }
        button {
            padding: 10px 18px;
            border: none;
            border-radius: 6px;
            background: var(--accent);
            color: white;
            cursor: pointer;
        }
        table { width: 100%; border-collapse: collapse; background: var(--bg-secondary); }
        th, td { text-align: left; padding: 8px 12px; border-bottom: 1px solid var(--border); }
        th { color: var(--text-secondary); font-weight: 600; }
        .error { color: var(--error); }
    </style>
</head>
<body>
    <main class="container">
        <h1>askql</h1>
        <p class="hint">Try "top 5 students in cse 2nd year", "laptop sales" or "sales by department".</p>
        <form id="ask-form">
            <input id="question" name="question" placeholder="Ask a question" autocomplete="off">
            <button type="submit">Ask</button>
        </form>
        <div id="result"></div>
    </main>
    <script>
        const form = document.getElementById('ask-form');
        const result = document.getElementById('result');

        function escapeHtml(value) {
            const div = document.createElement('div');
            div.textContent = value === null ? 'NULL' : String(value);
            return div.innerHTML;
        }

        function renderRows(rows) {
            if (rows.length === 0) {
                return '<p class="hint">No rows.</p>';
            }
            const columns = Object.keys(rows[0]);
            const head = columns.map(c => `<th>${escapeHtml(c)}</th>`).join('');
            const body = rows
                .map(row => `<tr>${columns.map(c => `<td>${escapeHtml(row[c])}</td>`).join('')}</tr>`)
                .join('');
            return `<table><thead><tr>${head}</tr></thead><tbody>${body}</tbody></table>`;
        }

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            const body = new URLSearchParams(new FormData(form));
            const response = await fetch('/ask', { method: 'POST', body });
            const payload = await response.json();
            if (response.ok) {
                result.innerHTML = renderRows(payload.data);
            } else {
                const details = payload.details ? `: ${escapeHtml(payload.details)}` : '';
                result.innerHTML = `<p class="error">${escapeHtml(payload.error)}${details}</p>`;
            }
        });
    </script>
</body>
</html>
"#;

/// Serve the main HTML page.
pub async fn serve_index() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        INDEX_HTML,
    )
}
