//! Stylesheet embedded into every rendered page.
//!
//! No external assets, no build tools, no CDN dependencies.

pub const STYLESHEET: &str = r#"
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 1100px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: baseline;
  justify-content: space-between;
  margin-bottom: 16px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header .api-base { color: var(--text-muted); font-family: var(--mono); font-size: 12px; }

.panel {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
  margin-bottom: 16px;
}
.panel h2 { font-size: 15px; margin-bottom: 10px; }
.row { display: flex; gap: 8px; align-items: center; flex-wrap: wrap; }
.muted { color: var(--text-muted); font-size: 13px; }

input, textarea {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  padding: 6px 10px;
  font-family: var(--font);
}
textarea { width: 100%; min-height: 64px; font-family: var(--mono); margin: 8px 0; }

.btn {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  cursor: pointer;
  padding: 6px 12px;
}
.btn:hover { border-color: var(--accent); }
.btn-primary { border-color: var(--accent); color: var(--accent); }
.btn-danger { border-color: var(--red); color: var(--red); }

.status { padding: 8px 12px; border-radius: 6px; margin-bottom: 16px; min-height: 38px; }
.status--idle { color: var(--text-muted); }
.status--loading { color: var(--yellow); }
.status--success { color: var(--green); border: 1px solid var(--green); }
.status--error { color: var(--red); border: 1px solid var(--red); }

table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid var(--border); vertical-align: top; }
th { color: var(--text-muted); font-weight: 500; font-size: 12px; text-transform: uppercase; }
td code { font-family: var(--mono); word-break: break-all; }
td.empty { color: var(--text-muted); text-align: center; }
.actions { display: flex; gap: 6px; }

.overlay {
  position: fixed;
  inset: 0;
  background: rgba(1, 4, 9, 0.8);
  display: flex;
  align-items: center;
  justify-content: center;
}
.confirm {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 24px;
  min-width: 320px;
}
.confirm p { margin-bottom: 16px; }
"#;
