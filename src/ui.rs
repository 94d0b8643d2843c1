use crate::metrics::TodaySummary;

pub fn render_index(summary: &TodaySummary) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &summary.date.to_string())
        .replace("{{PCT}}", &summary.achievement_pct.to_string())
        .replace("{{CHECKED}}", &summary.checked_count.to_string())
        .replace("{{TOTAL}}", &summary.total_habits.to_string())
        .replace("{{MOOD}}", &summary.mood.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>AI Habit Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4f8;
      --bg-2: #cfe3f2;
      --ink: #23323c;
      --accent: #2e8b6e;
      --accent-2: #35506b;
      --warn: #c06534;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 20px 54px rgba(53, 80, 107, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top right, var(--bg-2), transparent 55%),
        linear-gradient(150deg, var(--bg-1), #e4f0ea 55%, #f2f6f0 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      display: grid;
      gap: 24px;
    }

    header h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.9rem, 4vw, 2.6rem);
      margin: 0;
    }

    header .subtitle {
      margin: 4px 0 0;
      color: #5b6b76;
    }

    .columns {
      display: grid;
      grid-template-columns: 1.05fr 0.95fr;
      gap: 24px;
      align-items: start;
    }

    .card {
      background: var(--card);
      backdrop-filter: blur(10px);
      border-radius: 22px;
      box-shadow: var(--shadow);
      border: 1px solid rgba(53, 80, 107, 0.08);
      padding: 24px;
      display: grid;
      gap: 18px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.25rem;
    }

    .card h3 {
      margin: 0;
      font-size: 1.05rem;
    }

    .habit-grid {
      display: grid;
      grid-template-columns: repeat(2, minmax(0, 1fr));
      gap: 10px;
    }

    .habit {
      display: flex;
      align-items: center;
      gap: 10px;
      background: white;
      border: 1px solid rgba(53, 80, 107, 0.1);
      border-radius: 14px;
      padding: 12px 14px;
      cursor: pointer;
    }

    .habit input {
      width: 18px;
      height: 18px;
      accent-color: var(--accent);
    }

    .field {
      display: grid;
      gap: 6px;
    }

    .field label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7a8893;
    }

    .field input[type="range"] {
      accent-color: var(--accent);
    }

    select, input[type="password"] {
      border: 1px solid rgba(53, 80, 107, 0.18);
      border-radius: 10px;
      padding: 10px 12px;
      font: inherit;
      background: white;
    }

    .styles {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    .styles label {
      border: 1px solid rgba(53, 80, 107, 0.18);
      border-radius: 999px;
      padding: 8px 14px;
      cursor: pointer;
      background: white;
      font-size: 0.9rem;
    }

    .styles input {
      display: none;
    }

    .styles input:checked + span {
      color: var(--accent);
      font-weight: 600;
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
    }

    .metric {
      background: white;
      border-radius: 16px;
      border: 1px solid rgba(53, 80, 107, 0.08);
      padding: 14px;
    }

    .metric .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7a8893;
    }

    .metric .value {
      display: block;
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    #chart {
      width: 100%;
      height: 220px;
      display: block;
    }

    .bar {
      fill: var(--accent);
      opacity: 0.85;
    }

    .bar.today {
      fill: var(--warn);
    }

    .chart-label {
      fill: #71808b;
      font-size: 11px;
      font-family: "Space Grotesk", sans-serif;
    }

    button.primary {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 18px;
      font: inherit;
      font-weight: 600;
      color: white;
      background: var(--accent-2);
      cursor: pointer;
      box-shadow: 0 10px 22px rgba(53, 80, 107, 0.28);
    }

    button.primary:active {
      transform: scale(0.98);
    }

    .duo {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 14px;
    }

    .panel {
      background: white;
      border-radius: 16px;
      border: 1px solid rgba(53, 80, 107, 0.08);
      padding: 14px;
      display: grid;
      gap: 8px;
      min-height: 120px;
    }

    .panel img {
      width: 100%;
      border-radius: 12px;
    }

    .muted {
      color: #7a8893;
      font-size: 0.9rem;
    }

    #report {
      white-space: pre-wrap;
      font-size: 0.95rem;
      line-height: 1.45;
    }

    #share {
      white-space: pre-wrap;
      background: #20303b;
      color: #e8eef2;
      border-radius: 14px;
      padding: 16px;
      font-family: ui-monospace, "Cascadia Mono", monospace;
      font-size: 0.85rem;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: #5b6b76;
    }

    .status[data-type="error"] {
      color: #b43a2a;
    }

    @media (max-width: 820px) {
      .columns {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>📊 AI Habit Tracker</h1>
      <p class="subtitle">Check in today's habits → achievement chart → weather &amp; dog → AI coach report.</p>
    </header>

    <div class="columns">
      <section class="card">
        <h2>✅ Today's check-in <span class="muted" id="date">{{DATE}}</span></h2>
        <div class="habit-grid" id="habits"></div>

        <div class="field">
          <label for="mood">🙂 Mood (1-10)</label>
          <input type="range" id="mood" min="1" max="10" value="{{MOOD}}" />
        </div>

        <div class="metrics">
          <div class="metric">
            <span class="label">Achievement</span>
            <span class="value" id="pct">{{PCT}}%</span>
          </div>
          <div class="metric">
            <span class="label">Habits done</span>
            <span class="value" id="checked">{{CHECKED}}/{{TOTAL}}</span>
          </div>
          <div class="metric">
            <span class="label">Mood</span>
            <span class="value" id="mood-value">{{MOOD}}/10</span>
          </div>
        </div>

        <div>
          <h3>📈 Last 7 days</h3>
          <p class="muted">Six demo days plus today, kept in this session only.</p>
          <svg id="chart" viewBox="0 0 600 220" role="img" aria-label="Achievement chart"></svg>
        </div>
      </section>

      <section class="card">
        <h2>🧠 AI coach report</h2>

        <div class="duo">
          <div class="field">
            <label for="city">🏙️ City</label>
            <select id="city"></select>
          </div>
          <div class="field">
            <label>🧑‍🏫 Coach style</label>
            <div class="styles" id="styles"></div>
          </div>
        </div>

        <div class="duo">
          <div class="field">
            <label for="openai-key">OpenAI API key</label>
            <input type="password" id="openai-key" placeholder="sk-..." autocomplete="off" />
          </div>
          <div class="field">
            <label for="weather-key">OpenWeatherMap API key</label>
            <input type="password" id="weather-key" placeholder="optional" autocomplete="off" />
          </div>
        </div>
        <p class="muted">Keys are used for this session only and never stored.</p>

        <button class="primary" id="generate" type="button">🚀 Generate condition report</button>
        <div class="status" id="status"></div>

        <div class="duo">
          <div class="panel">
            <h3>🌦️ Weather</h3>
            <div id="weather" class="muted">No data yet.</div>
          </div>
          <div class="panel">
            <h3>🐶 Dog of the day</h3>
            <div id="dog" class="muted">No data yet.</div>
          </div>
        </div>

        <div class="panel">
          <h3>📝 Report</h3>
          <div id="report" class="muted">Press the button above to generate one.</div>
        </div>

        <div>
          <h3>📣 Share text</h3>
          <div id="share">...</div>
        </div>
      </section>
    </div>
  </main>

  <script>
    const habitsEl = document.getElementById('habits');
    const moodEl = document.getElementById('mood');
    const moodValueEl = document.getElementById('mood-value');
    const pctEl = document.getElementById('pct');
    const checkedEl = document.getElementById('checked');
    const dateEl = document.getElementById('date');
    const chartEl = document.getElementById('chart');
    const cityEl = document.getElementById('city');
    const stylesEl = document.getElementById('styles');
    const statusEl = document.getElementById('status');
    const weatherEl = document.getElementById('weather');
    const dogEl = document.getElementById('dog');
    const reportEl = document.getElementById('report');
    const shareEl = document.getElementById('share');

    let meta = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const getJson = async (url) => {
      const res = await fetch(url);
      if (!res.ok) {
        throw new Error(await res.text() || `request failed: ${url}`);
      }
      return res.json();
    };

    const renderMeta = () => {
      habitsEl.innerHTML = meta.habits
        .map(
          (habit) => `
        <label class="habit">
          <input type="checkbox" data-key="${habit.key}" />
          <span>${habit.emoji} ${habit.label}</span>
        </label>`
        )
        .join('');
      cityEl.innerHTML = meta.cities
        .map((city) => `<option value="${city}">${city}</option>`)
        .join('');
      stylesEl.innerHTML = meta.coach_styles
        .map(
          (style, index) => `
        <label>
          <input type="radio" name="style" value="${style.id}" ${index === 0 ? 'checked' : ''} />
          <span>${style.name}</span>
        </label>`
        )
        .join('');

      habitsEl.querySelectorAll('input').forEach((box) => {
        box.addEventListener('change', () => save().catch((err) => setStatus(err.message, 'error')));
      });
      moodEl.addEventListener('change', () => save().catch((err) => setStatus(err.message, 'error')));
      moodEl.addEventListener('input', () => {
        moodValueEl.textContent = `${moodEl.value}/10`;
      });
    };

    const currentChecks = () => {
      const checks = {};
      habitsEl.querySelectorAll('input').forEach((box) => {
        checks[box.dataset.key] = box.checked;
      });
      return checks;
    };

    const applySummary = (summary) => {
      dateEl.textContent = summary.date;
      pctEl.textContent = `${summary.achievement_pct}%`;
      checkedEl.textContent = `${summary.checked_count}/${summary.total_habits}`;
      moodValueEl.textContent = `${summary.mood}/10`;
    };

    const renderChart = (points) => {
      const width = 600;
      const height = 220;
      const paddingX = 36;
      const paddingY = 30;
      const top = 14;
      const innerW = width - paddingX * 2;
      const barW = Math.min(48, (innerW / points.length) * 0.62);
      const step = innerW / points.length;
      const scaleY = (height - top - paddingY) / 100;

      const bars = points
        .map((point, index) => {
          const x = paddingX + step * index + (step - barW) / 2;
          const h = point.achievement_pct * scaleY;
          const y = height - paddingY - h;
          const cls = index === points.length - 1 ? 'bar today' : 'bar';
          const label = point.date.slice(5).replace('-', '/');
          return `
            <rect class="${cls}" x="${x.toFixed(1)}" y="${y.toFixed(1)}" width="${barW.toFixed(1)}" height="${h.toFixed(1)}" rx="5" />
            <text class="chart-label" x="${(x + barW / 2).toFixed(1)}" y="${height - paddingY + 16}" text-anchor="middle">${label}</text>
            <text class="chart-label" x="${(x + barW / 2).toFixed(1)}" y="${(y - 6).toFixed(1)}" text-anchor="middle">${point.achievement_pct}</text>`;
        })
        .join('');

      chartEl.innerHTML = bars;
    };

    const loadSeries = async () => {
      const data = await getJson('/api/series');
      renderChart(data.points);
    };

    const loadShare = async () => {
      const res = await fetch('/api/share');
      shareEl.textContent = res.ok ? await res.text() : '(unavailable)';
    };

    const save = async () => {
      const res = await fetch('/api/checkin', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ habits: currentChecks(), mood: Number(moodEl.value) })
      });
      if (!res.ok) {
        throw new Error(await res.text() || 'save failed');
      }
      applySummary(await res.json());
      await Promise.all([loadSeries(), loadShare()]);
    };

    const failureText = (outcome, hint) => {
      if (outcome.reason === 'missing_api_key') {
        return `No API key provided. ${hint}`;
      }
      if (outcome.reason === 'status') {
        return `The service answered with HTTP ${outcome.code}.`;
      }
      if (outcome.reason === 'malformed') {
        return 'The service answered with something unreadable.';
      }
      return `Network problem: ${outcome.detail}`;
    };

    const renderOutcomes = (data) => {
      if (data.weather.status === 'ok') {
        const w = data.weather.data;
        weatherEl.classList.remove('muted');
        weatherEl.innerHTML = `
          <strong>${w.city}</strong> — ${w.description}<br/>
          ${w.temp_c.toFixed(1)}°C (feels like ${w.feels_like_c.toFixed(1)}°C), humidity ${w.humidity}%`;
      } else {
        weatherEl.classList.add('muted');
        weatherEl.textContent = failureText(data.weather, 'Enter an OpenWeatherMap key above.');
      }

      if (data.dog.status === 'ok') {
        dogEl.classList.remove('muted');
        dogEl.innerHTML = `<img src="${data.dog.data.url}" alt="dog" /><span class="muted">Breed: ${data.dog.data.breed}</span>`;
      } else {
        dogEl.classList.add('muted');
        dogEl.textContent = failureText(data.dog, '');
      }

      if (data.report.status === 'ok') {
        reportEl.classList.remove('muted');
        reportEl.textContent = data.report.data;
      } else {
        reportEl.classList.add('muted');
        reportEl.textContent = failureText(data.report, 'Enter an OpenAI key above.');
      }
    };

    const generate = async () => {
      setStatus('Generating...', '');
      const body = {
        city: cityEl.value,
        coach_style: stylesEl.querySelector('input:checked').value,
        openai_api_key: document.getElementById('openai-key').value || null,
        weather_api_key: document.getElementById('weather-key').value || null
      };
      const res = await fetch('/api/report', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error(await res.text() || 'report request failed');
      }
      renderOutcomes(await res.json());
      await loadShare();
      setStatus('', '');
    };

    document.getElementById('generate').addEventListener('click', () => {
      generate().catch((err) => setStatus(err.message, 'error'));
    });

    const restoreChecks = (habits) => {
      habitsEl.querySelectorAll('input').forEach((box) => {
        box.checked = Boolean(habits[box.dataset.key]);
      });
    };

    const boot = async () => {
      meta = await getJson('/api/meta');
      renderMeta();
      const summary = await getJson('/api/today');
      applySummary(summary);
      restoreChecks(summary.habits);
      moodEl.value = summary.mood;
      await Promise.all([loadSeries(), loadShare()]);
    };

    boot().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
