use crate::format::DisplayTemplate;
use crate::models::{AppData, StreakSnapshot};

pub fn render_index(date: &str, data: &AppData, snapshot: &StreakSnapshot, display: &str) -> String {
    let (template_label, template_tag) = match &data.template {
        DisplayTemplate::Builtin(format) => (format.label().to_string(), format.tag()),
        DisplayTemplate::Custom(text) => (format!("Custom \u{201c}{text}\u{201d}"), "custom"),
    };
    let username = data.username.as_deref().unwrap_or("no account yet");

    INDEX_HTML
        .replace("{{DATE}}", &escape(date))
        .replace("{{USER}}", &escape(username))
        .replace("{{DISPLAY}}", &escape(display))
        .replace("{{CURRENT}}", &snapshot.current_streak.to_string())
        .replace("{{LONGEST}}", &snapshot.longest_streak.to_string())
        .replace("{{TOTAL}}", &snapshot.total_count.to_string())
        .replace("{{TEMPLATE}}", &escape(&template_label))
        .replace("{{TEMPLATE_TAG}}", template_tag)
}

// Usernames and custom templates are user text; everything else we
// substitute is server-generated digits and dates.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Contribution Streak</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef6ee;
      --bg-2: #cdeccd;
      --ink: #20301f;
      --accent: #2da44e;
      --accent-2: #24403b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(36, 64, 59, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e2f2e0 60%, #f2f8ef 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5b6a58;
      font-size: 1rem;
    }

    .display-card {
      background: var(--accent-2);
      color: #f4faf2;
      border-radius: 20px;
      padding: 26px 30px;
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 12px;
    }

    .display-card .text {
      font-size: clamp(1.8rem, 5vw, 2.6rem);
      font-weight: 600;
      letter-spacing: 0.02em;
    }

    .display-card .meta {
      font-size: 0.9rem;
      color: #bcd3c4;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(36, 64, 59, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8a79;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.current {
      color: var(--accent);
    }

    .strip-card {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(36, 64, 59, 0.08);
      display: grid;
      gap: 12px;
    }

    .strip-card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    #strip {
      display: grid;
      grid-template-columns: repeat(35, 1fr);
      gap: 4px;
    }

    #strip .cell {
      aspect-ratio: 1 / 1;
      border-radius: 4px;
      background: #e4ece2;
    }

    #strip .cell[data-level="1"] { background: #9be9a8; }
    #strip .cell[data-level="2"] { background: #40c463; }
    #strip .cell[data-level="3"] { background: #30a14e; }
    #strip .cell[data-level="4"] { background: #216e39; }

    .formats {
      display: grid;
      gap: 16px;
    }

    .formats h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(36, 64, 59, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #64705f;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(36, 64, 59, 0.12);
    }

    .custom-row {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .custom-row input {
      flex: 1 1 220px;
      border: 1px solid rgba(36, 64, 59, 0.2);
      border-radius: 12px;
      padding: 12px 14px;
      font-size: 1rem;
      font-family: inherit;
    }

    button.apply, button.next {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 22px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease;
      color: white;
    }

    button.apply { background: var(--accent); }
    button.next { background: var(--accent-2); }

    button:active {
      transform: scale(0.98);
    }

    .status {
      font-size: 0.95rem;
      color: #64705f;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f7a6a;
      font-size: 0.9rem;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      #strip {
        grid-template-columns: repeat(7, 1fr);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Contribution Streak</h1>
      <p class="subtitle">Calendar for <strong>{{USER}}</strong>, evaluated {{DATE}}.</p>
    </header>

    <section class="display-card">
      <span class="text" id="display">{{DISPLAY}}</span>
      <span class="meta" id="template-label">{{TEMPLATE}}</span>
    </section>

    <section class="panel">
      <div class="stat">
        <span class="label">Current streak</span>
        <span id="current" class="value current">{{CURRENT}}</span>
      </div>
      <div class="stat">
        <span class="label">Longest streak</span>
        <span id="longest" class="value">{{LONGEST}}</span>
      </div>
      <div class="stat">
        <span class="label">Total contributions</span>
        <span id="total" class="value">{{TOTAL}}</span>
      </div>
    </section>

    <section class="strip-card">
      <h2>Last 35 days</h2>
      <div id="strip" aria-label="Daily contribution strip"></div>
    </section>

    <section class="formats">
      <h2>Display format</h2>
      <div class="tabs" role="tablist" data-active="{{TEMPLATE_TAG}}">
        <button class="tab" type="button" data-format="flame" role="tab">Flame</button>
        <button class="tab" type="button" data-format="days" role="tab">Days</button>
        <button class="tab" type="button" data-format="streak" role="tab">Day streak</button>
        <button class="tab" type="button" data-format="plain" role="tab">Number only</button>
      </div>
      <form id="custom-form" class="custom-row">
        <input id="custom-input" maxlength="15" placeholder="e.g. %d|%l|%t (max 15 chars)" />
        <button class="apply" type="submit">Apply custom</button>
        <button class="next" type="submit" form="next-form">Next format</button>
      </form>
      <form id="next-form" method="post" action="/template/next"></form>
      <p class="hint">%d current streak, %l longest streak, %t total contributions.</p>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const displayEl = document.getElementById('display');
    const templateLabelEl = document.getElementById('template-label');
    const currentEl = document.getElementById('current');
    const longestEl = document.getElementById('longest');
    const totalEl = document.getElementById('total');
    const stripEl = document.getElementById('strip');
    const statusEl = document.getElementById('status');
    const tabsEl = document.querySelector('.tabs');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const markActive = (tag) => {
      tabs.forEach((button) => {
        button.classList.toggle('active', button.dataset.format === tag);
      });
    };

    const levelFor = (count) => {
      if (count === 0) return 0;
      if (count < 3) return 1;
      if (count < 6) return 2;
      if (count < 10) return 3;
      return 4;
    };

    const renderStrip = (days) => {
      stripEl.innerHTML = '';
      days.forEach((day) => {
        const cell = document.createElement('div');
        cell.className = 'cell';
        cell.dataset.level = String(levelFor(day.count));
        cell.title = `${day.date}: ${day.count}`;
        stripEl.appendChild(cell);
      });
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      const stats = await res.json();
      currentEl.textContent = stats.current_streak;
      longestEl.textContent = stats.longest_streak;
      totalEl.textContent = stats.total_count;
      renderStrip(stats.recent_days);
    };

    const loadDisplay = async () => {
      const res = await fetch('/api/display');
      if (!res.ok) {
        throw new Error('Unable to load display text');
      }
      const display = await res.json();
      displayEl.textContent = display.text;
      if (display.template.builtin) {
        markActive(display.template.builtin);
      } else {
        markActive('custom');
        templateLabelEl.textContent = `Custom “${display.template.custom}”`;
      }
    };

    const applyTemplate = async (template) => {
      setStatus('Saving...', 'info');
      const res = await fetch('/api/template', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(template)
      });

      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }

      const display = await res.json();
      displayEl.textContent = display.text;
      if (display.template.builtin) {
        markActive(display.template.builtin);
        templateLabelEl.textContent = tabs.find(
          (button) => button.dataset.format === display.template.builtin
        ).textContent;
      } else {
        markActive('custom');
        templateLabelEl.textContent = `Custom “${display.template.custom}”`;
      }
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        applyTemplate({ builtin: button.dataset.format }).catch((err) =>
          setStatus(err.message, 'error')
        );
      });
    });

    const customForm = document.getElementById('custom-form');
    const customInput = document.getElementById('custom-input');

    customForm.addEventListener('submit', (event) => {
      event.preventDefault();
      applyTemplate({ custom: customInput.value }).catch((err) =>
        setStatus(err.message, 'error')
      );
    });

    markActive(tabsEl.dataset.active);
    Promise.all([loadStats(), loadDisplay()]).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
